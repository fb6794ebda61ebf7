//! In-memory mock filesystem for testing collectors without real `/proc`.
//!
//! `MockFs` is a cheap handle over shared state: clones see the same files,
//! so a test can keep one handle and rewrite counters while a `Collector`
//! owns another.

use crate::collector::traits::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file with the given content.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.insert(path.as_ref().to_path_buf(), content.into());
    }

    /// Removes a file, simulating a vanished `/proc` or `/sys` entry.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.remove(path.as_ref());
    }

    /// Adds a network interface's hardware address under `/sys/class/net`.
    pub fn add_interface_address(&self, sys_path: &str, name: &str, mac: &str) {
        self.add_file(
            format!("{}/class/net/{}/address", sys_path, name),
            format!("{}\n", mac),
        );
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.contains_key(path.as_ref())
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }
}
