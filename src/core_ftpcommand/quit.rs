use crate::helpers::send_response;
use log::{error, info};
use tokio::io::{AsyncWrite, Result};

/// Handles the QUIT FTP command.
///
/// Only says goodbye; the connection loop closes the socket afterwards.
pub async fn handle_quit_command<W>(writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    info!("Received QUIT command. Closing connection.");

    if let Err(e) = send_response(writer, 221, "Goodbye.").await {
        error!("Failed to send QUIT response: {}", e);
        return Err(e);
    }

    Ok(())
}
