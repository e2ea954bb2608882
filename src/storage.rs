use crate::errors::IoError;
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

/// Whole-file read and write primitives keyed by absolute path.
///
/// [`crate::VirtualFile`] only ever calls [`Storage::read`], and at most once. `write`
/// belongs to the writer stage that persists a file's target path and content.
pub trait Storage: fmt::Debug + Send + Sync {
    fn read(&self, path: &Path) -> Result<Vec<u8>, IoError>;

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), IoError>;
}

/// The local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;
impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>, IoError> {
        log::debug!("reading: {}", path.display());

        std::fs::read(path).map_err(|error| IoError::read(path, error))
    }
    /// Writes `contents` to `path`, creating missing parent directories first.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), IoError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| IoError::mkdir(parent, error))?;
        }

        std::fs::write(path, contents).map_err(|error| IoError::write(path, error))?;

        log::debug!("wrote: {}", path.display());

        Ok(())
    }
}

/// In-memory storage for synthetic files.
///
/// Every call to [`Storage::read`] is counted, hits and misses alike, which makes it the
/// natural double for asserting how often a virtual file touches storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<PathBuf, Vec<u8>>>,
    reads: AtomicUsize,
}
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
    /// Stores `contents` under `path`, replacing anything already there.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.write().insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().get(path).cloned()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    /// Number of read attempts so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}
impl Storage for MemoryStorage {
    fn read(&self, path: &Path) -> Result<Vec<u8>, IoError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        self.get(path).ok_or_else(|| {
            IoError::read(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file in memory"),
            )
        })
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), IoError> {
        self.insert(path, contents);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FileOperation;

    #[test]
    fn test_memory_storage_counts_every_read() {
        let storage = MemoryStorage::new();
        storage.insert("/proj/a.css", "a{}");

        assert_eq!(storage.read(Path::new("/proj/a.css")).unwrap(), b"a{}");
        assert!(storage.read(Path::new("/proj/missing.css")).is_err());
        assert_eq!(storage.reads(), 2);
    }

    #[test]
    fn test_memory_storage_missing_file_reports_path() {
        let storage = MemoryStorage::new();

        let error = storage.read(Path::new("/proj/missing.css")).unwrap_err();

        assert_eq!(error.operation, FileOperation::Read);
        assert_eq!(error.path, PathBuf::from("/proj/missing.css"));
        assert_eq!(error.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_storage_write_then_read() {
        let storage = MemoryStorage::new();

        storage.write(Path::new("/out/a.css"), b"a{}").unwrap();

        assert!(storage.contains(Path::new("/out/a.css")));
        assert_eq!(storage.get(Path::new("/out/a.css")), Some(b"a{}".to_vec()));
        assert_eq!(storage.reads(), 0);
    }

    #[test]
    fn test_fs_storage_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widget").join("p2").join("p2.css");

        FsStorage.write(&path, b"#p2 a{color:blue}\n").unwrap();

        assert_eq!(FsStorage.read(&path).unwrap(), b"#p2 a{color:blue}\n");
    }

    #[test]
    fn test_fs_storage_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.scss");

        let error = FsStorage.read(&path).unwrap_err();

        assert_eq!(error.operation, FileOperation::Read);
        assert_eq!(error.path, path);
    }
}
