use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::handlers::dispatch_command;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, BufReader};
use tokio::net::TcpListener;

/// Longest control line accepted, terminator included.
const MAX_LINE_LENGTH: u64 = 4096;

pub async fn start_server(ctx: Arc<ServerContext>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        ctx.config.server.listen_address, ctx.config.server.listen_port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    loop {
        let (socket, addr) = listener.accept().await?;
        info!("New connection from {:?}", addr);

        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, ctx).await {
                error!("Connection error: {:?}", e);
            }
            info!("Connection closed for {:?}", addr);
        });
    }
}

/// Splits a control line into its verb and argument.
///
/// The argument is everything after the first space, kept verbatim so names
/// with spaces survive.
pub fn parse_command_line(line: &str) -> (&str, &str) {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.split_once(' ') {
        Some((verb, arg)) => (verb, arg),
        None => (line, ""),
    }
}

pub enum ControlLine {
    Eof,
    Line(String),
    TooLong,
}

/// Reads one control line. Bytes that aren't UTF-8 are replaced rather than
/// rejected; lines over `MAX_LINE_LENGTH` are drained and reported as such.
pub async fn read_control_line<R>(
    reader: &mut R,
    buffer: &mut Vec<u8>,
) -> std::io::Result<ControlLine>
where
    R: AsyncBufRead + Unpin,
{
    buffer.clear();
    let n = (&mut *reader)
        .take(MAX_LINE_LENGTH)
        .read_until(b'\n', buffer)
        .await?;
    if n == 0 {
        return Ok(ControlLine::Eof);
    }

    if n as u64 == MAX_LINE_LENGTH && !buffer.ends_with(b"\n") {
        loop {
            buffer.clear();
            let n = (&mut *reader)
                .take(MAX_LINE_LENGTH)
                .read_until(b'\n', buffer)
                .await?;
            if n == 0 || buffer.ends_with(b"\n") {
                break;
            }
        }
        return Ok(ControlLine::TooLong);
    }

    Ok(ControlLine::Line(String::from_utf8_lossy(buffer).into_owned()))
}

/// Serves one control connection until QUIT or EOF.
pub async fn handle_connection<S>(socket: S, ctx: Arc<ServerContext>) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let mut session = Session::new();

    send_response(&mut writer, 220, &ctx.config.server.welcome_message).await?;

    let mut buffer = Vec::new();
    loop {
        let line = match read_control_line(&mut reader, &mut buffer)
            .await
            .context("Failed to read from control connection")?
        {
            ControlLine::Eof => {
                info!("Client disconnected");
                break;
            }
            ControlLine::TooLong => {
                warn!("Control line longer than {} bytes dropped", MAX_LINE_LENGTH);
                send_response(&mut writer, 500, "Command line too long.").await?;
                continue;
            }
            ControlLine::Line(line) => line,
        };

        let (verb, arg) = parse_command_line(&line);
        debug!("Received command: {} {}", verb, arg);

        let Some(command) = FtpCommand::from_str(verb) else {
            warn!("Unsupported command: {}", verb);
            send_response(&mut writer, 502, "Command not implemented.").await?;
            continue;
        };

        let handled = dispatch_command(&mut writer, &ctx, &mut session, command, arg).await;
        if let Err(e) = handled {
            session.transfer_close().await;
            return Err(e).with_context(|| format!("Error handling command {:?}", command));
        }

        if command == FtpCommand::QUIT {
            break;
        }
    }

    // Don't leave a dangling data connection behind.
    session.transfer_close().await;
    Ok(())
}
