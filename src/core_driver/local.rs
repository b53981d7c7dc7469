use super::{Driver, DriverError, FileInfo};
use crate::session::Session;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use log::{debug, warn};
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// Serves a local directory tree as the FTP root.
#[derive(Debug, Clone)]
pub struct LocalDriver {
    root: PathBuf,
}

impl LocalDriver {
    /// `root` must exist; it is canonicalized once here.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a virtual path onto the root. ".." never climbs above it.
    fn real_path(&self, path: &str) -> PathBuf {
        let relative = Path::new(path)
            .components()
            .fold(PathBuf::new(), |mut acc, comp| {
                match comp {
                    Component::ParentDir => {
                        acc.pop();
                    }
                    Component::Normal(part) => acc.push(part),
                    _ => {}
                }
                acc
            });
        self.root.join(relative)
    }

    /// Like `real_path`, but also refuses symlinks that lead out of the root.
    async fn confined_path(&self, path: &str) -> Result<PathBuf, DriverError> {
        let real = self.real_path(path);

        let probe = match fs::canonicalize(&real).await {
            Ok(canonical) => Some(canonical),
            Err(_) => match real.parent() {
                Some(parent) => fs::canonicalize(parent).await.ok(),
                None => None,
            },
        };

        match probe {
            Some(canonical) if !canonical.starts_with(&self.root) => {
                warn!("Path escapes the root: {} -> {:?}", path, canonical);
                Err(DriverError::PermissionDenied(path.to_string()))
            }
            _ => Ok(real),
        }
    }
}

#[async_trait]
impl Driver for LocalDriver {
    async fn change_directory(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        let real = self.confined_path(path).await?;
        let metadata = fs::metadata(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(DriverError::NotADirectory(path.to_string()));
        }
        Ok(())
    }

    async fn make_directory(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        let real = self.confined_path(path).await?;
        debug!("Creating directory {:?}", real);
        fs::create_dir(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))
    }

    async fn delete_file(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        let real = self.confined_path(path).await?;
        if real == self.root {
            return Err(DriverError::PermissionDenied(path.to_string()));
        }
        let metadata = fs::symlink_metadata(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))?;
        let removed = if metadata.is_dir() {
            fs::remove_dir(&real).await
        } else {
            fs::remove_file(&real).await
        };
        removed.map_err(|e| DriverError::from_io(path, e))
    }

    async fn remove_directory(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        let real = self.confined_path(path).await?;
        if real == self.root {
            return Err(DriverError::PermissionDenied(path.to_string()));
        }
        let metadata = fs::symlink_metadata(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(DriverError::NotADirectory(path.to_string()));
        }

        let mut entries = fs::read_dir(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))?;
        if entries.next_entry().await?.is_some() {
            return Err(DriverError::DirectoryNotEmpty(path.to_string()));
        }

        fs::remove_dir(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))
    }

    async fn list_files(
        &self,
        _session: &Session,
        path: &str,
    ) -> Result<Vec<FileInfo>, DriverError> {
        let real = self.confined_path(path).await?;
        let metadata = fs::metadata(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))?;
        if !metadata.is_dir() {
            return Err(DriverError::NotADirectory(path.to_string()));
        }

        let mut entries = fs::read_dir(&real)
            .await
            .map_err(|e| DriverError::from_io(path, e))?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(
                        "Failed to get metadata for entry: {:?}, error: {:?}",
                        entry.path(),
                        e
                    );
                    continue;
                }
            };

            let modified: DateTime<Local> = metadata
                .modified()
                .unwrap_or(SystemTime::UNIX_EPOCH)
                .into();

            files.push(FileInfo {
                mode: mode_string(&metadata),
                size: metadata.len(),
                modified: modified.naive_local(),
                name: entry.file_name().to_string_lossy().into_owned(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

fn mode_string(metadata: &Metadata) -> String {
    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        'd'
    } else if file_type.is_symlink() {
        'l'
    } else {
        '-'
    };
    format_mode(kind, permission_bits(metadata))
}

/// Renders a type character and the low nine permission bits as `ls` does.
fn format_mode(kind: char, bits: u32) -> String {
    let mut mode = String::with_capacity(10);
    mode.push(kind);
    for (i, c) in "rwxrwxrwx".chars().enumerate() {
        mode.push(if bits & (1 << (8 - i)) != 0 { c } else { '-' });
    }
    mode
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    let bits = if metadata.is_dir() { 0o755 } else { 0o644 };
    if metadata.permissions().readonly() {
        bits & !0o222
    } else {
        bits
    }
}
