//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use ctfdock_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CtfdockResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same state, so a test can hand one clone to a service
/// and inspect the result through another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
    executables: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file (and its parent directories).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
    }

    /// Seed a directory (and its parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        if let Ok(mut inner) = self.inner.write() {
            insert_ancestors(&mut inner.directories, path.as_ref());
        }
    }

    /// Read a file's content as UTF-8 (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    /// Check if a file is marked executable.
    pub fn is_executable(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.executables.contains(path))
            .unwrap_or(false)
    }

    /// Every file path currently stored.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if !ancestor.as_os_str().is_empty() {
            directories.insert(ancestor.to_path_buf());
        }
    }
}

fn missing(path: &Path, reason: &str) -> ctfdock_core::error::CtfdockError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.is_file(path)
    }

    fn list_files(&self, dir: &Path) -> CtfdockResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if !inner.directories.contains(dir) {
            return Err(missing(dir, "Directory does not exist"));
        }

        Ok(inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name()?.to_str().map(str::to_owned))
            .collect())
    }

    fn canonicalize(&self, path: &Path) -> CtfdockResult<PathBuf> {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }
        if !self.exists(&resolved) {
            return Err(missing(path, "Path does not exist"));
        }
        Ok(resolved)
    }

    fn create_dir_all(&self, path: &Path) -> CtfdockResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> CtfdockResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| missing(from, "Source file does not exist"))?;

        if let Some(parent) = to.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(missing(to, "Parent directory does not exist"));
            }
        }

        if inner.executables.contains(from) {
            inner.executables.insert(to.to_path_buf());
        }
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> CtfdockResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(missing(path, "Parent directory does not exist"));
            }
        }

        inner
            .files
            .insert(path.to_path_buf(), content.as_bytes().to_vec());
        Ok(())
    }

    fn set_permissions(&self, path: &Path, executable: bool) -> CtfdockResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if executable {
            inner.executables.insert(path.to_path_buf());
        } else {
            inner.executables.remove(path);
        }

        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> CtfdockResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        if !inner.directories.contains(path) {
            return Err(missing(path, "Directory does not exist"));
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.executables.retain(|p| !p.starts_with(path));

        Ok(())
    }
}
