// ============================================================================
// domain/error.rs - TASK DIRECTORY + VERSION RULE VIOLATIONS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Task directory contents
    // ========================================================================
    #[error("Cannot get flag file name, no file's name contains 'flag'")]
    MissingFlagFile,

    #[error("Too many flag files: {}", names.join(", "))]
    MultipleFlagFiles { names: Vec<String> },

    #[error("Cannot find the pwn-task elf file next to the flag")]
    MissingTaskFile,

    #[error(
        "Too many files: expected one pwn-task elf file and one flag, found {}",
        names.join(", ")
    )]
    MultipleTaskFiles { names: Vec<String> },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid libc version '{version}': {reason}")]
    InvalidLibcVersion { version: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingFlagFile => vec![
                "Put the flag into the task directory".into(),
                "The flag file's name must contain 'flag' (e.g. flag, flag.txt)".into(),
            ],
            Self::MultipleFlagFiles { .. } => vec![
                "Keep exactly one file whose name contains 'flag'".into(),
                "Rename or remove the extra ones".into(),
            ],
            Self::MissingTaskFile => vec![
                "Copy the challenge binary into the task directory".into(),
                "Its name must not contain 'flag'".into(),
            ],
            Self::MultipleTaskFiles { .. } => vec![
                "Make sure there are only two files in the task directory".into(),
                "One is the pwn-task elf file and the other is the flag".into(),
            ],
            Self::MissingRequiredField { field } if *field == "libc_version" => vec![
                "Please specify the version of glibc when you use patchelf".into(),
                "Example: ctfdock 20 -t ./chal -d ./out -p -l 2.23".into(),
            ],
            Self::InvalidLibcVersion { .. } => vec![
                "Use the bare version string, e.g. 2.27".into(),
                "It selects libs/libc-<version>.so and libs/ld-<version>.so".into(),
            ],
            _ => vec!["Use --help for usage information".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingFlagFile | Self::MissingTaskFile => ErrorCategory::NotFound,
            Self::MultipleFlagFiles { .. }
            | Self::MultipleTaskFiles { .. }
            | Self::MissingRequiredField { .. }
            | Self::InvalidLibcVersion { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
