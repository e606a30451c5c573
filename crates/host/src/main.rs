//! Driver Drowsiness Monitor - Main Entry Point
//!
//! Usage:
//!   drowsiness-monitor run --replay <FILE>   Start detection over recorded landmarks
//!   drowsiness-monitor log                   View the alert log

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use host::{init_logging, run_replay, view_log, Settings};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "drowsiness-monitor",
    about = "Driver drowsiness and yawning alerts from facial landmarks",
    version
)]
struct Cli {
    /// Settings file (TOML); defaults to ./drowsiness.toml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging, including per-frame EAR/MAR
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start detection
    Run {
        /// Recorded landmark session (JSON lines)
        #[arg(long)]
        replay: PathBuf,

        /// Deliver frames at their recorded pace
        #[arg(long)]
        realtime: bool,
    },

    /// View the alert log
    Log,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    init_logging(&settings.logging, cli.verbose);

    match cli.command {
        Commands::Run { replay, realtime } => {
            info!("=== Driver Drowsiness Monitor v{} ===", env!("CARGO_PKG_VERSION"));
            let report = run_replay(&settings, &replay, realtime).await?;
            info!(
                "Session finished ({:?}): {} frames, {} alerts, {} skipped frames",
                report.detection.reason,
                report.detection.frames,
                report.detection.alerts,
                report.detection.skipped_frames
            );
        }
        Commands::Log => {
            println!("{}", view_log(&settings).await?);
        }
    }

    Ok(())
}
