//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use hookgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HookgenError, HookgenResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> HookgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> HookgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> HookgenResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> HookgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_remove_roundtrip() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = temp.path().join("demo/src");

        fs.create_dir_all(&dir).unwrap();
        fs.write_file(&dir.join("main.ts"), b"export {};\n").unwrap();
        assert!(fs.exists(&dir.join("main.ts")));

        fs.remove_dir_all(&temp.path().join("demo")).unwrap();
        assert!(!fs.exists(&dir));
    }

    #[test]
    fn write_into_missing_parent_is_a_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .write_file(&temp.path().join("nope/file.txt"), b"x")
            .unwrap_err();

        assert!(matches!(
            err,
            HookgenError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
