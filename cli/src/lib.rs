//! CLI utilities for handsign.
//!
//! This crate provides the configuration file, directory layout and output
//! formatting shared by handsign command-line tools.

pub mod config;
pub mod output;
pub mod paths;

pub use config::{load_config, Backend, Config, StorageConfig};
pub use output::{Output, OutputFormat};
pub use paths::Paths;
