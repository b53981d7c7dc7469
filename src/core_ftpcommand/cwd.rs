use crate::core_ftpcommand::cdup::handle_cdup_command;
use crate::core_ftpcommand::utils::abs_path;
use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Handles the CWD (Change Working Directory) FTP command.
///
/// ".." is treated as CDUP. Anything else is resolved against the session's
/// current directory and handed to the driver; the session only moves when
/// the driver accepts the new directory.
pub async fn handle_cwd_command<W>(
    writer: &mut W,
    ctx: &ServerContext,
    session: &mut Session,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    if arg == ".." {
        return handle_cdup_command(writer, ctx, session).await;
    }

    let path = abs_path(session.path(), arg);
    info!("Received CWD command with argument: {}", arg);

    match ctx.driver.change_directory(session, &path).await {
        Ok(()) => {
            info!("Directory successfully changed to: {}", path);
            let message = format!("CD worked on {}", path);
            session.set_path(path);
            send_response(writer, 250, &message).await?;
        }
        Err(e) => {
            warn!("Failed to change directory to {}: {}", path, e);
            send_response(writer, 550, &format!("CD issue: {}", e)).await?;
        }
    }

    Ok(())
}
