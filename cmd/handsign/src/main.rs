//! handsign CLI - learn and recognize hand signs from landmark frames.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    ClassifyCommand, ConfigCommand, ExportCommand, ImportCommand, LearnCommand, StatsCommand,
};

/// handsign CLI - k-nearest-neighbor hand sign recognition.
///
/// Frames are read from JSON or JSON Lines files, one object per frame:
///   {"landmarks": [[{"x": .., "y": .., "z": ..}, ... 21 points], ...]}
///
/// Configuration and the training slot live in ~/.handsign/handsign/.
#[derive(Parser)]
#[command(name = "handsign")]
#[command(about = "Hand sign recognition CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.handsign/handsign/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Input frames file (JSON or JSON Lines)
    #[arg(short = 'f', long = "file", global = true)]
    pub input: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record every hand in the input frames under a label
    Learn(LearnCommand),
    /// Classify the first hand of each input frame
    Classify(ClassifyCommand),
    /// Write the training set as a model file
    Export(ExportCommand),
    /// Replace the training set with a model file
    Import(ImportCommand),
    /// Show training set statistics
    Stats(StatsCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Learn(cmd) => cmd.run(&cli),
        Commands::Classify(cmd) => cmd.run(&cli),
        Commands::Export(cmd) => cmd.run(&cli),
        Commands::Import(cmd) => cmd.run(&cli),
        Commands::Stats(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
