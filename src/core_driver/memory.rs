// In-memory driver used by the command tests. Records every call it gets.
use super::{Driver, DriverError, FileInfo};
use crate::session::Session;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryDriver {
    dirs: Mutex<BTreeSet<String>>,
    files: Mutex<BTreeSet<String>>,
    listings: Mutex<HashMap<String, Vec<FileInfo>>>,
    calls: Mutex<Vec<String>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        let driver = Self::default();
        driver.add_dir("/");
        driver
    }

    pub fn with_dirs(dirs: &[&str]) -> Self {
        let driver = Self::new();
        for dir in dirs {
            driver.add_dir(dir);
        }
        driver
    }

    pub fn add_dir(&self, path: &str) {
        self.dirs.lock().unwrap().insert(path.to_string());
    }

    pub fn add_file(&self, path: &str) {
        self.files.lock().unwrap().insert(path.to_string());
    }

    pub fn set_listing(&self, path: &str, files: Vec<FileInfo>) {
        self.add_dir(path);
        self.listings
            .lock()
            .unwrap()
            .insert(path.to_string(), files);
    }

    pub fn has_dir(&self, path: &str) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    pub fn has_file(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains(path)
    }

    /// Calls so far, as `"<op> <path>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, path: &str) {
        self.calls.lock().unwrap().push(format!("{} {}", op, path));
    }
}

#[async_trait]
impl Driver for MemoryDriver {
    async fn change_directory(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        self.record("cd", path);
        if self.has_dir(path) {
            Ok(())
        } else if self.has_file(path) {
            Err(DriverError::NotADirectory(path.to_string()))
        } else {
            Err(DriverError::NotFound(path.to_string()))
        }
    }

    async fn make_directory(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        self.record("mkdir", path);
        if !self.dirs.lock().unwrap().insert(path.to_string()) {
            return Err(DriverError::AlreadyExists(path.to_string()));
        }
        Ok(())
    }

    async fn delete_file(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        self.record("delete", path);
        if self.files.lock().unwrap().remove(path) || self.dirs.lock().unwrap().remove(path) {
            Ok(())
        } else {
            Err(DriverError::NotFound(path.to_string()))
        }
    }

    async fn remove_directory(&self, _session: &Session, path: &str) -> Result<(), DriverError> {
        self.record("rmdir", path);
        if self.has_file(path) {
            return Err(DriverError::NotADirectory(path.to_string()));
        }
        let mut dirs = self.dirs.lock().unwrap();
        if !dirs.contains(path) {
            return Err(DriverError::NotFound(path.to_string()));
        }
        let prefix = format!("{}/", path);
        let has_children = dirs.iter().any(|d| d.starts_with(&prefix))
            || self.files.lock().unwrap().iter().any(|f| f.starts_with(&prefix));
        if has_children {
            return Err(DriverError::DirectoryNotEmpty(path.to_string()));
        }
        dirs.remove(path);
        Ok(())
    }

    async fn list_files(
        &self,
        _session: &Session,
        path: &str,
    ) -> Result<Vec<FileInfo>, DriverError> {
        self.record("list", path);
        if let Some(files) = self.listings.lock().unwrap().get(path) {
            return Ok(files.clone());
        }
        if self.has_dir(path) {
            Ok(Vec::new())
        } else {
            Err(DriverError::NotFound(path.to_string()))
        }
    }
}
