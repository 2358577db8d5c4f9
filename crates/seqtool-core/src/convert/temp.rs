use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

/// Temporary directories owned by one conversion run.
///
/// Directories are created lazily under a single root and removed together
/// by `cleanup`, which the orchestrator calls once every task has joined.
#[derive(Debug, Default)]
pub struct TempStore {
    root: Mutex<Option<TempDir>>,
    created: Mutex<usize>,
}

impl TempStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh directory whose name starts with `prefix`.
    pub fn make_dir(&self, prefix: &str) -> Result<PathBuf> {
        let mut root = self.root.lock().unwrap_or_else(|e| e.into_inner());
        if root.is_none() {
            *root = Some(tempfile::Builder::new().prefix("seqtool").tempdir()?);
        }
        let parent = root.as_ref().map(|r| r.path().to_path_buf()).unwrap_or_default();

        let mut created = self.created.lock().unwrap_or_else(|e| e.into_inner());
        *created += 1;
        let path = parent.join(format!("{}{}", prefix, *created));
        fs::create_dir(&path)?;
        debug!("Created temporary directory {:?}", path);
        Ok(path)
    }

    /// Remove every directory created by this store.
    pub fn cleanup(self) -> Result<()> {
        let root = self.root.into_inner().unwrap_or_else(|e| e.into_inner());
        if let Some(root) = root {
            debug!("Removing temporary files under {:?}", root.path());
            root.close()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_directories() {
        let store = TempStore::new();
        let first = store.make_dir("ifs").unwrap();
        let second = store.make_dir("sounds").unwrap();
        assert!(first.is_dir());
        assert!(second.is_dir());
        assert_ne!(first, second);

        store.cleanup().unwrap();
        assert!(!first.exists());
        assert!(!second.exists());
    }

    #[test]
    fn test_cleanup_without_directories() {
        TempStore::new().cleanup().unwrap();
    }
}
