use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// Which backend capability RMD goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RemoveMode {
    /// Generic delete, which also accepts files.
    #[default]
    Delete,
    /// Directory-only removal.
    RemoveDir,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    pub chroot_dir: String,
    pub welcome_message: String,
    pub rmd_mode: RemoveMode,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from("0.0.0.0"),
            listen_port: 21,
            chroot_dir: String::from("/var/ftp"),
            welcome_message: String::from("rouillenav ready."),
            rmd_mode: RemoveMode::default(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path))?;
        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse configuration file: {}", path))
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Listen Address: {}", config.server.listen_address);
    info!("  Listen Port: {}", config.server.listen_port);
    info!("  Chroot Directory: {}", config.server.chroot_dir);
    info!("  RMD Mode: {:?}", config.server.rmd_mode);
}
