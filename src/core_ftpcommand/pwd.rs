// src/core_ftpcommand/pwd.rs
use crate::helpers::send_response;
use crate::session::Session;
use tokio::io::AsyncWrite;

pub async fn handle_pwd_command<W>(writer: &mut W, session: &Session) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response = format!("\"{}\" is the current directory", session.path());
    send_response(writer, 257, &response).await
}
