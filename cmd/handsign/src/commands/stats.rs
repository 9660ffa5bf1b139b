//! Stats command.

use clap::Args;
use serde::Serialize;

use super::{get_config, open_session, output};
use crate::Cli;

/// Show training set statistics.
#[derive(Args)]
pub struct StatsCommand {}

#[derive(Serialize)]
struct Stats {
    size: usize,
    dimension: Option<usize>,
    k: usize,
    storage: String,
    labels: Vec<LabelCount>,
}

#[derive(Serialize)]
struct LabelCount {
    label: String,
    count: usize,
}

impl StatsCommand {
    pub fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let session = open_session(&cfg)?;

        let stats = Stats {
            size: session.len(),
            dimension: session.dimension(),
            k: session.k(),
            storage: session
                .storage_location()
                .unwrap_or_else(|| cfg.storage.backend.to_string()),
            labels: session
                .labels()
                .into_iter()
                .map(|(label, count)| LabelCount { label, count })
                .collect(),
        };

        output(cli).write(&stats)
    }
}
