use crate::config::{log_config, Config};
use crate::core_driver::{Driver, LocalDriver};
use crate::core_network::network;
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

/// What every connection shares: read-only config and the storage driver.
pub struct ServerContext {
    pub config: Arc<Config>,
    pub driver: Arc<dyn Driver>,
}

impl ServerContext {
    pub fn new(config: Config, driver: Arc<dyn Driver>) -> Self {
        Self {
            config: Arc::new(config),
            driver,
        }
    }
}

/// Runs the FTP server with the provided configuration.
///
/// The chroot directory is served through a `LocalDriver`; it must exist.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config:");
    log_config(&config);

    let driver = LocalDriver::new(&config.server.chroot_dir).with_context(|| {
        format!(
            "Failed to open chroot directory: {}",
            config.server.chroot_dir
        )
    })?;
    info!("Serving files from {:?}", driver.root());

    let context = Arc::new(ServerContext::new(config, Arc::new(driver)));

    match network::start_server(context).await {
        Ok(_) => info!("Server stopped."),
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
