//! Byte-oriented file storage used for effect containers.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{NotFoundSnafu, Result};

/// Hierarchical byte storage (a mounted flash filesystem on the device)
pub trait Storage {
    /// Read a whole file; `Ok(None)` if it does not exist
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Create or replace a file
    fn write(&mut self, path: &str, data: &[u8]) -> Result<()>;

    /// Names of the regular files directly inside `dir`
    fn list(&self, dir: &str) -> Result<Vec<String>>;

    /// Create `dir` if it is missing
    fn ensure_dir(&mut self, _dir: &str) -> Result<()> {
        Ok(())
    }
}

/// In-memory [`Storage`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a file, returning its contents
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }
}

/// Split `path` into its parent directory and file name
fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

impl Storage for MemoryStorage {
    fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<()> {
        let (dir, _) = split_path(path);
        if !dir.is_empty() && !self.dirs.contains(dir) {
            return NotFoundSnafu { what: dir }.fail();
        }
        self.files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn list(&self, dir: &str) -> Result<Vec<String>> {
        if !self.dirs.contains(dir) {
            return NotFoundSnafu { what: dir }.fail();
        }
        Ok(self
            .files
            .keys()
            .map(|path| split_path(path))
            .filter(|(parent, _)| *parent == dir)
            .map(|(_, name)| name.to_string())
            .collect())
    }

    fn ensure_dir(&mut self, dir: &str) -> Result<()> {
        self.dirs.insert(dir.to_string());
        Ok(())
    }
}
