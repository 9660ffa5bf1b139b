//! Utility functions for CLI commands.

use std::path::Path;

use handsign_cli::{load_config, Backend, Config, Output, OutputFormat};
use handsign_landmark::Hand;
use handsign_persist::{BoxedPersister, JsonFile, RedbSlot};
use handsign_session::{Session, SessionConfig};
use serde::Deserialize;
use tracing::info;

use crate::Cli;

const APP_NAME: &str = "handsign";

/// One detector result: every hand found in a camera frame.
#[derive(Debug, Default, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub landmarks: Vec<Hand>,
}

/// Gets the global configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(APP_NAME, cli.config.as_deref())
}

/// Opens the session described by the configuration.
///
/// The slot is restored first. A slot that has never been written is
/// seeded from the configured model file, if any; a slot saved empty stays
/// empty.
pub fn open_session(cfg: &Config) -> anyhow::Result<Session> {
    let scfg = SessionConfig::default()
        .with_k(cfg.k)
        .with_dimension(cfg.dimension);

    let (session, fresh) = match cfg.storage.backend {
        Backend::Memory => (Session::in_memory(scfg), true),
        Backend::Json => open_slot(scfg, Box::new(JsonFile::new(cfg.storage_path()))),
        Backend::Redb => {
            let path = cfg.storage_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            open_slot(scfg, Box::new(RedbSlot::open(&path)?))
        }
    };

    if fresh {
        if let Some(model) = &cfg.model {
            let n = session.import_from(&JsonFile::new(model))?;
            info!("seeded {} exemplars from {}", n, model.display());
        }
    }

    Ok(session)
}

/// Opens a session on `slot`, reporting whether the slot was never written.
///
/// An unreadable slot is not fresh, so seeding never overwrites it.
fn open_slot(scfg: SessionConfig, slot: BoxedPersister) -> (Session, bool) {
    let fresh = matches!(slot.load(), Ok(None));
    (Session::open(scfg, slot), fresh)
}

/// Requires input file to be provided.
pub fn require_input_file(cli: &Cli) -> anyhow::Result<&str> {
    cli.input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("input file is required, use -f flag"))
}

/// Loads frames from a JSON array, a single JSON object or JSON Lines.
pub fn load_frames(path: impl AsRef<Path>) -> anyhow::Result<Vec<Frame>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    parse_frames(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
}

fn parse_frames(content: &str) -> anyhow::Result<Vec<Frame>> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }
    if let Ok(frame) = serde_json::from_str::<Frame>(trimmed) {
        return Ok(vec![frame]);
    }

    let mut frames = Vec::new();
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame = serde_json::from_str(line)
            .map_err(|e| anyhow::anyhow!("line {}: {}", i + 1, e))?;
        frames.push(frame);
    }
    Ok(frames)
}

/// Returns the output configuration from global flags.
pub fn output(cli: &Cli) -> Output {
    Output::new(
        OutputFormat::from_flag(cli.json),
        cli.output.as_ref().map(Into::into),
    )
}

/// Prints a success message.
pub fn print_success(message: &str) {
    eprintln!("[ok] {}", message);
}
