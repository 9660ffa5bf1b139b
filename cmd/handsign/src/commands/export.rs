//! Export command.

use std::io::Write;

use clap::Args;

use handsign_persist::JsonFile;

use super::{get_config, open_session, print_success};
use crate::Cli;

/// Write the training set as a JSON model file.
///
/// Writes to the -o file, or to stdout when none is given.
#[derive(Args)]
pub struct ExportCommand {}

impl ExportCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let session = open_session(&cfg)?;

        match &cli.output {
            Some(path) => {
                let n = session.export_to(&JsonFile::new(path))?;
                print_success(&format!("Exported {} exemplars to {}", n, path));
            }
            None => {
                let data = session.export_json()?;
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&data)?;
                stdout.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
