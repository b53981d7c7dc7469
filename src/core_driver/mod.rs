// Storage backends for the directory commands.
//
// The command layer only ever hands a driver an absolute virtual path
// ("/", "/pub/incoming"); how that maps to real storage is up to the driver.

pub mod error;
pub mod local;
#[cfg(test)]
pub mod memory;

pub use error::DriverError;
pub use local::LocalDriver;

use crate::session::Session;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// One entry of a directory listing, as reported by a driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// `ls -l` style mode, e.g. `drwxr-xr-x`.
    pub mode: String,
    pub size: u64,
    /// Wall-clock modification time, already in the timezone to display.
    pub modified: NaiveDateTime,
    pub name: String,
}

/// The storage capabilities the directory commands rely on.
///
/// Every call receives the session issuing it so a driver can key per-user
/// state off it.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn change_directory(&self, session: &Session, path: &str) -> Result<(), DriverError>;

    async fn make_directory(&self, session: &Session, path: &str) -> Result<(), DriverError>;

    /// Generic removal: files, and whatever else the backend allows.
    async fn delete_file(&self, session: &Session, path: &str) -> Result<(), DriverError>;

    /// Removes an empty directory and nothing else.
    async fn remove_directory(&self, session: &Session, path: &str) -> Result<(), DriverError>;

    async fn list_files(&self, session: &Session, path: &str)
        -> Result<Vec<FileInfo>, DriverError>;
}
