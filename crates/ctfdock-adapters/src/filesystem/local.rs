//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use ctfdock_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{CtfdockError, CtfdockResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, dir: &Path) -> CtfdockResult<Vec<String>> {
        let entries = std::fs::read_dir(dir).map_err(|e| map_io_error(dir, e, "read directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(dir, e, "read directory entry"))?;
            let path = entry.path();
            // Follows symlinks, so a linked binary still counts as a file.
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().into_string().map_err(|raw| {
                CtfdockError::from(ApplicationError::FilesystemError {
                    path: dir.join(&raw),
                    reason: "file name is not valid UTF-8".into(),
                })
            })?;
            names.push(name);
        }

        Ok(names)
    }

    fn canonicalize(&self, path: &Path) -> CtfdockResult<PathBuf> {
        std::fs::canonicalize(path).map_err(|e| map_io_error(path, e, "resolve path"))
    }

    fn create_dir_all(&self, path: &Path) -> CtfdockResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CtfdockResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }

    fn write_file(&self, path: &Path, content: &str) -> CtfdockResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> CtfdockResult<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata =
                std::fs::metadata(path).map_err(|e| map_io_error(path, e, "get metadata"))?;
            let mut perms = metadata.permissions();
            let mode = perms.mode();
            perms.set_mode(if executable { mode | 0o111 } else { mode & !0o111 });
            std::fs::set_permissions(path, perms)
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }
        #[cfg(windows)]
        {
            // Windows doesn't have executable bit in the same way
            let _ = (path, executable);
        }
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> CtfdockResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> CtfdockError {
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
    fn list_files_skips_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("chal"), b"ELF").unwrap();
        std::fs::write(tmp.path().join("flag"), b"flag{x}").unwrap();
        std::fs::create_dir(tmp.path().join("subdir")).unwrap();

        let mut names = LocalFilesystem.list_files(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["chal".to_string(), "flag".to_string()]);
    }

    #[test]
    fn list_files_on_missing_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .list_files(&tmp.path().join("nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            CtfdockError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn copy_file_copies_bytes() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a");
        let to = tmp.path().join("b");
        std::fs::write(&from, [0x7f, b'E', b'L', b'F', 0]).unwrap();

        LocalFilesystem.copy_file(&from, &to).unwrap();

        assert_eq!(std::fs::read(&to).unwrap(), [0x7f, b'E', b'L', b'F', 0]);
    }

    #[test]
    fn canonicalize_resolves_parent_components() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("chal")).unwrap();

        let resolved = LocalFilesystem
            .canonicalize(&tmp.path().join("chal").join(".."))
            .unwrap();

        assert_eq!(resolved, std::fs::canonicalize(tmp.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn set_permissions_toggles_exec_bits() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("start.sh");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();

        LocalFilesystem.set_permissions(&path, true).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);

        LocalFilesystem.set_permissions(&path, false).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
    }
}
