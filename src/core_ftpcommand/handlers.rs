use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::{cdup, cwd, list, mkd, noop, pwd, quit, rmd, syst};
use crate::server::ServerContext;
use crate::session::Session;
use tokio::io::AsyncWrite;

/// Runs one command to completion, reply included.
///
/// Errors are control-channel write failures only; everything else has
/// already been turned into a reply.
pub async fn dispatch_command<W>(
    writer: &mut W,
    ctx: &ServerContext,
    session: &mut Session,
    command: FtpCommand,
    arg: &str,
) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    match command {
        FtpCommand::CWD => cwd::handle_cwd_command(writer, ctx, session, arg).await,
        FtpCommand::CDUP => cdup::handle_cdup_command(writer, ctx, session).await,
        FtpCommand::MKD => mkd::handle_mkd_command(writer, ctx, session, arg).await,
        FtpCommand::RMD => rmd::handle_rmd_command(writer, ctx, session, arg).await,
        FtpCommand::PWD => pwd::handle_pwd_command(writer, session).await,
        FtpCommand::LIST => list::handle_list_command(writer, ctx, session, arg).await,
        FtpCommand::NOOP => noop::handle_noop_command(writer).await,
        FtpCommand::SYST => syst::handle_syst_command(writer).await,
        FtpCommand::QUIT => quit::handle_quit_command(writer).await,
    }
}
