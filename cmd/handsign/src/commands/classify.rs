//! Classify command.

use clap::Args;
use serde::Serialize;

use handsign_knear::Prediction;

use super::{get_config, load_frames, open_session, output, require_input_file};
use crate::Cli;

/// Classify the first hand of each input frame.
///
/// Frames without a hand produce no row.
#[derive(Args)]
pub struct ClassifyCommand {}

#[derive(Serialize)]
struct Row {
    frame: usize,
    label: String,
    votes: usize,
    neighbors: usize,
    confidence: f32,
    distance: f32,
}

impl Row {
    fn new(frame: usize, p: Prediction) -> Self {
        Self {
            frame,
            confidence: p.confidence(),
            label: p.label,
            votes: p.votes,
            neighbors: p.neighbors,
            distance: p.distance,
        }
    }
}

impl ClassifyCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let input = require_input_file(cli)?;
        let frames = load_frames(input)?;

        let cfg = get_config(cli)?;
        let session = open_session(&cfg)?;
        if session.is_empty() {
            anyhow::bail!("no training data, run `handsign learn` or `handsign import` first");
        }

        let mut rows = Vec::new();
        for (i, frame) in frames.iter().enumerate() {
            if let Some(p) = session.on_frame(&frame.landmarks)? {
                rows.push(Row::new(i, p));
            }
        }

        output(cli).write(&rows)
    }
}
