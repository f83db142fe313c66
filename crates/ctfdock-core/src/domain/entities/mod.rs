pub mod artifact;
pub mod plan;
pub mod task_bundle;

pub use crate::domain::DomainError;
pub use artifact::Artifact;
pub use plan::{PatchBundle, ScaffoldPlan, ScaffoldRequest};
pub use task_bundle::TaskBundle;
