//! Overwrite confirmation adapters.

mod fixed;
mod terminal;

pub use fixed::FixedDecision;
pub use terminal::TerminalPrompt;
