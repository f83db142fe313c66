//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ctfdock-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory checks, copies, writes
//!   - `OverwriteDecider`: confirmation before replacing an existing output dir
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, OverwriteDecider, OverwriteDecision};

#[cfg(test)]
pub use output::MockOverwriteDecider;
