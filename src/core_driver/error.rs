// Storage backend errors. Their text is what FTP clients end up reading.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File exists: {0}")]
    AlreadyExists(String),

    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Maps an I/O failure on `path` to the closest variant.
    pub fn from_io(path: &str, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => DriverError::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => DriverError::AlreadyExists(path.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                DriverError::PermissionDenied(path.to_string())
            }
            _ => DriverError::Io(error),
        }
    }
}
