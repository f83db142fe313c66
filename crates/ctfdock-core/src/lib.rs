//! ctfdock Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the ctfdock
//! deployment generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           ctfdock-cli (CLI)             │
//! │   (parses args, owns config + logging)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! │   Validate → Stage → Render pipeline    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Filesystem, OverwriteDecider)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    ctfdock-adapters (Infrastructure)    │
//! │ (LocalFilesystem, TerminalPrompt, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (TaskBundle, ScaffoldPlan, templates)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ctfdock_core::prelude::*;
//!
//! # fn demo(filesystem: Box<dyn Filesystem>, decider: &mut dyn OverwriteDecider) -> CtfdockResult<()> {
//! let request = ScaffoldRequest::new(UbuntuVersion::V20, "./chal", "./out", "/opt/ctfdock");
//! let service = ScaffoldService::new(filesystem);
//! match service.run(&request, decider)? {
//!     ScaffoldOutcome::Completed(report) => println!("wrote {}", report.output_dir.display()),
//!     ScaffoldOutcome::Declined { .. } => println!("nothing written"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldOutcome, ScaffoldReport, ScaffoldService, StageOutcome,
        ports::{Filesystem, OverwriteDecider, OverwriteDecision},
    };
    pub use crate::domain::{
        Artifact, LibcVersion, PatchBundle, ScaffoldPlan, ScaffoldRequest, TaskBundle,
        UbuntuVersion,
    };
    pub use crate::error::{CtfdockError, CtfdockResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
