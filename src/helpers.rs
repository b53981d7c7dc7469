use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sends a `<code> <message>` reply line to the client.
pub async fn send_response<W>(writer: &mut W, code: u16, message: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    writer
        .write_all(format!("{} {}\r\n", code, message).as_bytes())
        .await?;
    writer.flush().await?;
    Ok(())
}
