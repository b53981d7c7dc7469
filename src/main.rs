mod config;
mod core_cli;
mod core_driver;
mod core_ftpcommand;
mod core_network;
mod helpers;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use anyhow::Result;
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };

    // Initialize the logger with a custom format and colors
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let timestamp = buf.timestamp().to_string();
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();

    // Determine the default config path based on the OS
    let default_config_path = if cfg!(target_os = "windows") {
        "C:\\rouillenav\\etc\\rouillenav.conf"
    } else {
        "/etc/rouillenav.conf"
    };

    let config_path = if args.config.is_empty() {
        default_config_path
    } else {
        args.config.as_str()
    };
    let mut config = Config::load_from_file(config_path)?;

    // Override listen port from CLI if provided
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }

    server::run(config).await?;

    Ok(())
}
