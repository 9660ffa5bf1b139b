//! Configuration management commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use handsign_cli::Backend;

use super::{get_config, output, print_success};
use crate::Cli;

/// Manage CLI configuration.
///
/// Configuration is stored in ~/.handsign/handsign/config.yaml
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// View the current configuration
    Show,
    /// Set the number of neighbors consulted per classification
    #[command(name = "set-k")]
    SetK {
        /// Neighbor count (positive)
        k: usize,
    },
    /// Set where the training slot is stored
    #[command(name = "set-storage")]
    SetStorage {
        /// Backend: redb, json or memory
        backend: Backend,
        /// Slot path (default: data/training.<ext> next to the config)
        #[arg(long)]
        path: Option<String>,
    },
    /// Set the model file imported when the slot is empty
    #[command(name = "set-model")]
    SetModel {
        /// Model file; omit to clear
        path: Option<PathBuf>,
    },
}

impl ConfigCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigSubcommand::Show => {
                let cfg = get_config(cli)?;
                eprintln!("Config file: {}", cfg.path().display());
                eprintln!("Storage: {}", cfg.storage_path().display());
                output(cli).write(&cfg)
            }

            ConfigSubcommand::SetK { k } => {
                if *k == 0 {
                    anyhow::bail!("k must be positive");
                }
                let mut cfg = get_config(cli)?;
                cfg.k = *k;
                cfg.save()?;
                print_success(&format!("k set to {}", k));
                Ok(())
            }

            ConfigSubcommand::SetStorage { backend, path } => {
                let mut cfg = get_config(cli)?;
                cfg.storage.backend = *backend;
                cfg.storage.path = path.clone().unwrap_or_default();
                cfg.save()?;
                print_success(&format!(
                    "Storage set to {} at {}",
                    backend,
                    cfg.storage_path().display()
                ));
                Ok(())
            }

            ConfigSubcommand::SetModel { path } => {
                let mut cfg = get_config(cli)?;
                cfg.model = path.clone();
                cfg.save()?;
                match path {
                    Some(p) => print_success(&format!("Model set to {}", p.display())),
                    None => print_success("Model cleared"),
                }
                Ok(())
            }
        }
    }
}
