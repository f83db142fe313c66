//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! "validate, stage, render" pipeline.

pub mod scaffold_service;

pub use scaffold_service::{ScaffoldOutcome, ScaffoldReport, ScaffoldService, StageOutcome};
