//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// Local file system implementation
///
/// Writes go through a temporary file in the target directory and are
/// renamed into place, so readers never observe a half-written artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    /// Atomically write raw bytes
    pub fn write_bytes(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        tmp.write_all(content).map_err(|e| FsError::at(path, e))?;
        tmp.flush().map_err(|e| FsError::at(path, e))?;
        tmp.persist(path)
            .map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.write_bytes(path, content.as_bytes())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn list_dir(&self, path: &Path) -> FsResult<Vec<String>> {
        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FsError::at(path, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::at(path, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        let bytes = std::fs::read(path).map_err(|e| FsError::at(path, e))?;
        Ok(ContentHash::of(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_fs_write_and_read() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "hello world").unwrap();
        let content = fs.read(&file).unwrap();

        assert_eq!(content, "hello world");
    }

    #[test]
    fn local_fs_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("dir").join("test.txt");
        let fs = LocalFs::new();

        fs.write(&file, "content").unwrap();

        assert!(file.exists());
    }

    #[test]
    fn local_fs_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("env.toml");
        let fs = LocalFs::new();

        fs.write(&file, "old").unwrap();
        fs.write(&file, "new").unwrap();

        assert_eq!(fs.read(&file).unwrap(), "new");
        assert_eq!(fs.list_dir(dir.path()).unwrap(), vec!["env.toml"]);
    }

    #[test]
    fn local_fs_remove_reports_not_found() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        let err = fs.remove(&dir.path().join("missing.pkg")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn local_fs_remove_dir_all() {
        let dir = tempdir().unwrap();
        let tree = dir.path().join("gems").join("a-1.0.0");
        let fs = LocalFs::new();

        fs.write(&tree.join("lib").join("a.rb"), "").unwrap();
        fs.remove_dir_all(&tree).unwrap();

        assert!(!tree.exists());
    }

    #[test]
    fn local_fs_list_dir_is_sorted_and_tolerates_missing_dir() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();

        assert!(fs.list_dir(&dir.path().join("cache")).unwrap().is_empty());

        fs.write(&dir.path().join("cache").join("b-1.0.0.pkg"), "").unwrap();
        fs.write(&dir.path().join("cache").join("a-1.0.0.pkg"), "").unwrap();
        assert_eq!(
            fs.list_dir(&dir.path().join("cache")).unwrap(),
            vec!["a-1.0.0.pkg", "b-1.0.0.pkg"]
        );
    }

    #[test]
    fn local_fs_hash() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("hash.txt");
        let fs = LocalFs::new();

        fs.write(&file, "hello").unwrap();
        let hash = fs.hash(&file).unwrap();

        assert_eq!(hash, ContentHash::of(b"hello"));
    }
}
