use crate::core_ftpcommand::utils::abs_path;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the MKD (Make Directory) FTP command.
///
/// # Arguments
///
/// * `writer` - The control channel replies go to.
/// * `ctx` - Shared server state, including the storage driver.
/// * `session` - The client's session; its current directory is the base for relative names.
/// * `arg` - The directory to create.
///
/// # Returns
///
/// Result<(), std::io::Error> indicating whether the reply could be written.
pub async fn handle_mkd_command<W>(
    writer: &mut W,
    ctx: &ServerContext,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let path = abs_path(session.path(), arg);
    info!("Received MKD command with argument: {}", arg);

    match ctx.driver.make_directory(session, &path).await {
        Ok(()) => {
            info!("Directory created successfully: {}", path);
            send_response(writer, 257, &format!("Created dir {}", path)).await?;
        }
        Err(e) => {
            error!("Failed to create directory: {}, error: {}", path, e);
            send_response(writer, 550, &format!("Could not create {} : {}", path, e)).await?;
        }
    }

    Ok(())
}
