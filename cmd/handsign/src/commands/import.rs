//! Import command.

use clap::Args;

use handsign_persist::JsonFile;

use super::{get_config, open_session, print_success};
use crate::Cli;

/// Replace the training set with a JSON model file.
///
/// The current set is kept if the file is missing or malformed.
#[derive(Args)]
pub struct ImportCommand {
    /// Model file to import
    model: String,
}

impl ImportCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let session = open_session(&cfg)?;

        let n = session.import_from(&JsonFile::new(&self.model))?;
        if session.is_dirty() {
            session.flush()?;
        }

        print_success(&format!("Imported {} exemplars from {}", n, self.model));
        Ok(())
    }
}
