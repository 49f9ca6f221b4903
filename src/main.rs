//! Binary entry point that glues configuration and logging to the TUI: read
//! the flags, resolve where exports and logs go, and drive the Ratatui event
//! loop until the user exits.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lyrics_arranger::logging::init_tracing;
use lyrics_arranger::{run_app, App, Config};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Arrange song lyrics section by section", long_about = None)]
struct Cli {
    /// Configuration file to use instead of ~/.lyrics-arranger/config.toml.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory the arrangement is exported into.
    #[arg(short, long)]
    export_dir: Option<PathBuf>,
    /// File log output is appended to.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    config.apply_overrides(cli.export_dir, cli.log_file);

    init_tracing(&config.resolved_log_file()?, &config.log_filter)?;

    let export_dir = config.resolved_export_dir()?;
    info!(export_dir = %export_dir.display(), "starting lyrics arranger");

    let mut app = App::new(export_dir, config.open_after_export);
    run_app(&mut app)
}
