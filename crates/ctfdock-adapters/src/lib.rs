//! Infrastructure adapters for ctfdock.
//!
//! This crate implements the ports defined in `ctfdock-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod prompt;
pub mod toolkit;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompt::{FixedDecision, TerminalPrompt};
pub use toolkit::{available_libc_versions, resolve_toolkit_dir};
