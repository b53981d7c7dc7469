use crate::helpers::send_response;
use crate::server::ServerContext;
use crate::session::Session;
use log::{info, warn};
use tokio::io::AsyncWrite;

/// Parent of an absolute path: everything up to the last "/", without a
/// trailing slash unless that leaves the root.
pub fn parent_dir(path: &str) -> String {
    let mut parent = match path.rfind('/') {
        Some(idx) => path[..=idx].to_string(),
        None => String::new(),
    };

    if parent != "/" && parent.ends_with('/') {
        parent.pop();
    }

    parent
}

/// Handles the CDUP (Change to Parent Directory) FTP command.
pub async fn handle_cdup_command<W>(
    writer: &mut W,
    ctx: &ServerContext,
    session: &mut Session,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    let parent = parent_dir(session.path());

    match ctx.driver.change_directory(session, &parent).await {
        Ok(()) => {
            info!("Directory successfully changed to: {}", parent);
            let message = format!("CDUP worked on {}", parent);
            session.set_path(parent);
            send_response(writer, 250, &message).await?;
        }
        Err(e) => {
            warn!("Failed to change directory to {}: {}", parent, e);
            send_response(writer, 550, &format!("CDUP issue: {}", e)).await?;
        }
    }

    Ok(())
}
