//! Application layer for ctfdock.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! naming or templating rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{ScaffoldOutcome, ScaffoldReport, ScaffoldService, StageOutcome};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, OverwriteDecider, OverwriteDecision};

pub use error::ApplicationError;
