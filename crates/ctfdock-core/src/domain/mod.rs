//! Core domain layer for ctfdock.
//!
//! This module contains pure business logic with no I/O. Reading task
//! directories, copying files and prompting the user are handled via ports
//! (traits) defined in the application layer.
//!
//! - **No I/O**: task discovery works on file names handed in by the caller
//! - **Immutable plan**: a [`ScaffoldPlan`] never changes once validated
//! - **Pure rendering**: every artifact is a function of the plan

pub mod entities;
pub mod error;
pub mod templates;
pub mod value_objects;

// Re-exports for convenience
pub use entities::{
    artifact::Artifact,
    plan::{LIBS_DIR, PATCHELF_FILE, PatchBundle, ScaffoldPlan, ScaffoldRequest, TASK_DIR},
    task_bundle::{FLAG_MARKER, TaskBundle},
};

pub use error::{DomainError, ErrorCategory};

pub use templates::{ARTIFACT_FILES, RenderContext, render_all};

pub use value_objects::{
    EXTERNAL_PORT, INTERNAL_PORT, LibcVersion, UbuntuVersion,
};
