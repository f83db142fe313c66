//! Application layer errors.
//!
//! These errors represent failures while checking or mutating the
//! filesystem, not naming-rule violations. Those are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The task directory is missing or is not a directory.
    #[error("Task directory {path} does not exist or is not a directory")]
    TaskDirNotFound { path: PathBuf },

    /// The destination directory is missing or is not a directory.
    #[error("Destination directory {path} does not exist or is not a directory")]
    DestDirNotFound { path: PathBuf },

    /// `patchelf` is not in the toolkit directory.
    #[error("Cannot find patchelf in {dir}")]
    PatchToolNotFound { dir: PathBuf },

    /// The requested libc/ld pair is not in the toolkit's `libs/`.
    #[error("Cannot find libc-{version}.so or ld-{version}.so in {dir}")]
    LibraryPairNotFound { version: String, dir: PathBuf },

    /// `<dest-dir>/<task-name>` is the task directory or one of its parents,
    /// so replacing it would delete the inputs.
    #[error("Output directory {output_dir} would overwrite the task directory {task_dir}")]
    OutputOverlapsTaskDir { output_dir: PathBuf, task_dir: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The overwrite confirmation could not be obtained.
    #[error("Confirmation prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// Shared adapter state is unusable (lock poisoned, etc.).
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TaskDirNotFound { path } => vec![
                format!("Check the --task-dir path: {}", path.display()),
                "It must hold the pwn-task elf file and the flag".into(),
            ],
            Self::DestDirNotFound { path } => vec![
                format!("Check the --dest-dir path: {}", path.display()),
                format!("Create it first: mkdir -p {}", path.display()),
            ],
            Self::PatchToolNotFound { dir } => vec![
                format!("Place a patchelf executable at {}", dir.join("patchelf").display()),
                "Or point --toolkit-dir / CTFDOCK_TOOLKIT_DIR at the directory holding it".into(),
            ],
            Self::LibraryPairNotFound { version, dir } => vec![
                format!(
                    "Both libc-{version}.so and ld-{version}.so must exist in {}",
                    dir.display()
                ),
                "Check the --libc-version value".into(),
            ],
            Self::OutputOverlapsTaskDir { task_dir, .. } => vec![
                format!("Choose a --dest-dir outside {}", task_dir.display()),
                "Or move the task files into a differently named directory".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The output directory may be partially written".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Answer the overwrite prompt with y or n".into(),
                "Use --yes to overwrite without asking".into(),
            ],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TaskDirNotFound { .. }
            | Self::DestDirNotFound { .. }
            | Self::PatchToolNotFound { .. }
            | Self::LibraryPairNotFound { .. } => ErrorCategory::NotFound,
            Self::PromptFailed { .. } | Self::OutputOverlapsTaskDir { .. } => {
                ErrorCategory::Validation
            }
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
