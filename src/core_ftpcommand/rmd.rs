use crate::config::RemoveMode;
use crate::core_ftpcommand::utils::abs_path;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use log::{error, info};
use tokio::io::AsyncWrite;

/// Handles the RMD (Remove Directory) FTP command.
///
/// Depending on `server.rmd_mode` the removal goes through the driver's
/// generic delete or its directory-only removal.
pub async fn handle_rmd_command<W>(
    writer: &mut W,
    ctx: &ServerContext,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let path = abs_path(session.path(), arg);
    info!("Received RMD command with argument: {}", arg);

    let removed = match ctx.config.server.rmd_mode {
        RemoveMode::Delete => ctx.driver.delete_file(session, &path).await,
        RemoveMode::RemoveDir => ctx.driver.remove_directory(session, &path).await,
    };

    match removed {
        Ok(()) => {
            info!("Directory removed successfully: {}", path);
            send_response(writer, 250, &format!("Deleted dir {}", path)).await?;
        }
        Err(e) => {
            error!("Failed to remove directory: {}, error: {}", path, e);
            send_response(writer, 550, &format!("Could not delete dir {}: {}", path, e)).await?;
        }
    }

    Ok(())
}
