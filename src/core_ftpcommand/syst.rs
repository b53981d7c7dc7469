use crate::helpers::send_response;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the SYST (System) FTP command.
///
/// Listings are `ls -l` style, so clients are told this is UNIX.
pub async fn handle_syst_command<W>(writer: &mut W) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    info!("Responding to SYST command with system type.");

    if let Err(e) = send_response(writer, 215, "UNIX Type: L8").await {
        error!("Failed to send SYST response: {}", e);
        return Err(e);
    }

    Ok(())
}
