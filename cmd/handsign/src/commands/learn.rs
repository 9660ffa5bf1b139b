//! Learn command.

use clap::Args;
use tracing::debug;

use super::{get_config, load_frames, open_session, print_success, require_input_file};
use crate::Cli;

/// Record every detected hand in the input frames as an exemplar.
///
/// All hands are added in one step: if any of them is rejected, nothing is
/// learned.
#[derive(Args)]
pub struct LearnCommand {
    /// Label for the recorded sign
    #[arg(short = 'l', long)]
    label: String,
}

impl LearnCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let input = require_input_file(cli)?;
        if self.label.trim().is_empty() {
            anyhow::bail!("label must not be empty");
        }

        let frames = load_frames(input)?;
        let hands: Vec<_> = frames.into_iter().flat_map(|f| f.landmarks).collect();
        if hands.is_empty() {
            anyhow::bail!("{}: no hands found", input);
        }
        debug!("learning {} hands as {:?}", hands.len(), self.label);

        let cfg = get_config(cli)?;
        let session = open_session(&cfg)?;
        let size = session.learn_all(&hands, &self.label)?;
        if session.is_dirty() {
            session.flush()?;
        }

        print_success(&format!(
            "Learned {} exemplars for \"{}\" ({} total)",
            hands.len(),
            self.label,
            size
        ));
        Ok(())
    }
}
