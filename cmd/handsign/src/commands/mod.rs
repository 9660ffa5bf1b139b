//! CLI commands module.

mod classify;
mod config;
mod export;
mod import;
mod learn;
mod stats;
mod util;

pub use classify::ClassifyCommand;
pub use config::ConfigCommand;
pub use export::ExportCommand;
pub use import::ImportCommand;
pub use learn::LearnCommand;
pub use stats::StatsCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
