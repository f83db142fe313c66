//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ctfdock-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::CtfdockResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ctfdock_adapters::filesystem::LocalFilesystem` (production)
/// - `ctfdock_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// `true` if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// `true` if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the regular files directly inside `dir`. Sub-directories
    /// are not listed.
    fn list_files(&self, dir: &Path) -> CtfdockResult<Vec<String>>;

    /// Absolute form of an existing `path` with `.`/`..` and symlinks
    /// resolved, for comparing two user-supplied paths.
    fn canonicalize(&self, path: &Path) -> CtfdockResult<PathBuf>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CtfdockResult<()>;

    /// Copy a file's bytes (and, where supported, its mode) to `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> CtfdockResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> CtfdockResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> CtfdockResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> CtfdockResult<()>;
}

/// Answer to "the output directory already exists, replace it?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// Delete the existing directory and continue.
    Overwrite,
    /// Leave it untouched and stop without error.
    Keep,
}

/// Port for the overwrite confirmation.
///
/// Implemented by:
/// - `ctfdock_adapters::prompt::TerminalPrompt` (interactive y/n)
/// - `ctfdock_adapters::prompt::FixedDecision` (`--yes`, tests)
#[cfg_attr(test, mockall::automock)]
pub trait OverwriteDecider {
    /// Decide what to do about `existing`, which is known to exist.
    fn decide(&mut self, existing: &Path) -> CtfdockResult<OverwriteDecision>;
}
