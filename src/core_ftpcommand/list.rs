use crate::core_driver::FileInfo;
use crate::core_ftpcommand::utils::abs_path;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::{Session, TransferError};
use log::{debug, error, info, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One `ls -l` style line, without the line terminator.
///
/// Owner and group are always "ftp"; drivers don't report ownership.
pub fn file_stat(file: &FileInfo) -> String {
    format!(
        "{} 1 ftp ftp {:>12} {} {}",
        file.mode,
        file.size,
        file.modified.format(" %b %e %H:%M "),
        file.name
    )
}

/// Writes `files` as a listing, in the given order, followed by a blank line.
///
/// The sink is neither opened nor closed here.
pub async fn dir_list<S>(sink: &mut S, files: &[FileInfo]) -> std::io::Result<()>
where
    S: AsyncWrite + Unpin + ?Sized,
{
    for file in files {
        sink.write_all(format!("{}\r\n", file_stat(file)).as_bytes())
            .await?;
    }
    sink.write_all(b"\r\n").await?;
    sink.flush().await
}

/// Handles the LIST FTP command.
///
/// The listing is fetched before the data connection is touched, so a driver
/// failure costs no transfer. Once opened, the transfer is closed whether or
/// not the listing made it through.
pub async fn handle_list_command<W>(
    writer: &mut W,
    ctx: &ServerContext,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let dir = abs_path(session.path(), arg);
    info!("Received LIST command for: {}", dir);

    let files = match ctx.driver.list_files(session, &dir).await {
        Ok(files) => files,
        Err(e) => {
            error!("Error listing directory {}: {}", dir, e);
            send_response(writer, 500, &format!("Could not list: {}", e)).await?;
            return Ok(());
        }
    };
    debug!(
        "{} entries in {}, data channel attached: {}",
        files.len(),
        dir,
        session.has_data_channel()
    );

    let rendered = match session.transfer_open(writer).await {
        Ok(channel) => dir_list(channel, &files).await,
        Err(TransferError::NoDataConnection) => {
            warn!("LIST without a data connection");
            send_response(writer, 425, "Can't open data connection.").await?;
            return Ok(());
        }
        Err(TransferError::Control(e)) => {
            session.transfer_close().await;
            return Err(e);
        }
    };

    session.transfer_close().await;

    match rendered {
        Ok(()) => {
            info!("Directory listing sent successfully.");
            send_response(writer, 226, "Closing transfer connection").await?;
        }
        Err(e) => {
            error!("Failed to send directory listing: {:?}", e);
            send_response(writer, 426, "Connection closed; transfer aborted.").await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core_driver::memory::MemoryDriver;
    use chrono::NaiveDate;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio::io::AsyncReadExt;

    /// Control channel whose peer has gone away.
    struct BrokenControl;

    impl AsyncWrite for BrokenControl {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::ErrorKind::BrokenPipe.into()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn info(mode: &str, size: u64, name: &str) -> FileInfo {
        FileInfo {
            mode: mode.to_string(),
            size,
            modified: NaiveDate::from_ymd_opt(2017, 1, 2)
                .unwrap()
                .and_hms_opt(15, 4, 5)
                .unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_file_stat_layout() {
        assert_eq!(
            file_stat(&info("-rw-r--r--", 123, "file.txt")),
            "-rw-r--r-- 1 ftp ftp          123  Jan  2 15:04  file.txt"
        );
    }

    #[test]
    fn test_file_stat_two_digit_day() {
        let mut file = info("drwxr-xr-x", 0, "dir");
        file.modified = NaiveDate::from_ymd_opt(2020, 11, 23)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap();
        assert_eq!(
            file_stat(&file),
            "drwxr-xr-x 1 ftp ftp            0  Nov 23 09:07  dir"
        );
    }

    #[tokio::test]
    async fn test_dir_list_empty() {
        let mut out = Vec::new();
        dir_list(&mut out, &[]).await.unwrap();
        assert_eq!(out, b"\r\n");
    }

    #[tokio::test]
    async fn test_dir_list_size_field_width() {
        let files = vec![
            info("-rw-r--r--", 0, "zero"),
            info("-rw-r--r--", 123, "small"),
            info("-rw-r--r--", 123456789012, "big"),
        ];
        let mut out = Vec::new();
        dir_list(&mut out, &files).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.split_terminator("\r\n").collect();
        assert_eq!(lines.len(), 4);
        assert!(text.ends_with("big\r\n\r\n"));
        assert_eq!(lines[3], "");

        let prefix = "-rw-r--r-- 1 ftp ftp ";
        let sizes: Vec<&str> = lines[..3]
            .iter()
            .map(|line| &line[prefix.len()..prefix.len() + 12])
            .collect();
        assert_eq!(
            sizes,
            vec!["           0", "         123", "123456789012"]
        );
    }

    #[tokio::test]
    async fn test_dir_list_keeps_driver_order() {
        let files = vec![info("-rw-r--r--", 1, "b"), info("-rw-r--r--", 1, "a")];
        let mut out = Vec::new();
        dir_list(&mut out, &files).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.find(" b\r\n").unwrap() < text.find(" a\r\n").unwrap());
    }

    #[tokio::test]
    async fn test_list_sends_listing_and_closes() {
        let driver = Arc::new(MemoryDriver::new());
        driver.set_listing("/pub", vec![info("-rw-r--r--", 5, "readme.txt")]);
        let ctx = ServerContext::new(Config::default(), driver.clone());
        let mut session = Session::new();
        let (mut client, server) = tokio::io::duplex(64 * 1024);
        session.attach_data_channel(Box::new(server));
        let mut out = Vec::new();

        handle_list_command(&mut out, &ctx, &mut session, "pub")
            .await
            .unwrap();

        assert!(!session.has_data_channel());
        assert_eq!(driver.calls(), vec!["list /pub"]);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "150 Using transfer connection\r\n226 Closing transfer connection\r\n"
        );

        let mut received = String::new();
        client.read_to_string(&mut received).await.unwrap();
        assert_eq!(
            received,
            "-rw-r--r-- 1 ftp ftp            5  Jan  2 15:04  readme.txt\r\n\r\n"
        );
    }

    #[tokio::test]
    async fn test_list_driver_failure_skips_transfer() {
        let driver = Arc::new(MemoryDriver::new());
        let ctx = ServerContext::new(Config::default(), driver);
        let mut session = Session::new();
        let (_client, server) = tokio::io::duplex(1024);
        session.attach_data_channel(Box::new(server));
        let mut out = Vec::new();

        handle_list_command(&mut out, &ctx, &mut session, "missing")
            .await
            .unwrap();

        assert!(session.has_data_channel());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "500 Could not list: No such file or directory: /missing\r\n"
        );
    }

    #[tokio::test]
    async fn test_list_without_data_connection() {
        let driver = Arc::new(MemoryDriver::new());
        let ctx = ServerContext::new(Config::default(), driver);
        let mut session = Session::new();
        let mut out = Vec::new();

        handle_list_command(&mut out, &ctx, &mut session, "")
            .await
            .unwrap();

        assert_eq!(out, b"425 Can't open data connection.\r\n");
    }

    #[tokio::test]
    async fn test_list_write_failure_still_closes() {
        let driver = Arc::new(MemoryDriver::new());
        driver.set_listing("/", vec![info("-rw-r--r--", 5, "readme.txt")]);
        let ctx = ServerContext::new(Config::default(), driver);
        let mut session = Session::new();
        let (client, server) = tokio::io::duplex(1024);
        drop(client);
        session.attach_data_channel(Box::new(server));
        let mut out = Vec::new();

        handle_list_command(&mut out, &ctx, &mut session, "")
            .await
            .unwrap();

        assert!(!session.has_data_channel());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "150 Using transfer connection\r\n426 Connection closed; transfer aborted.\r\n"
        );
    }

    #[tokio::test]
    async fn test_list_control_failure_releases_data_channel() {
        let driver = Arc::new(MemoryDriver::new());
        driver.set_listing("/", vec![info("-rw-r--r--", 5, "readme.txt")]);
        let ctx = ServerContext::new(Config::default(), driver);
        let mut session = Session::new();
        let (mut client, server) = tokio::io::duplex(1024);
        session.attach_data_channel(Box::new(server));

        let result = handle_list_command(&mut BrokenControl, &ctx, &mut session, "").await;

        assert_eq!(
            result.unwrap_err().kind(),
            std::io::ErrorKind::BrokenPipe
        );
        assert!(!session.has_data_channel());

        // Shut down cleanly, with nothing sent.
        let mut received = Vec::new();
        client.read_to_end(&mut received).await.unwrap();
        assert!(received.is_empty());
    }
}
