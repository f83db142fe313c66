//! Command handlers. `ctfdock` has a single action, so there is one.

pub mod generate;
