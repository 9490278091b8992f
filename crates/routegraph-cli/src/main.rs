mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "routegraph")]
#[command(version, about = "routegraph - cross-check declared routes against route references", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect routes, scan sources, write the JSON report and print a summary
    Check {
        /// Configuration file (default: ./routegraph.toml, defaults if absent)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the routing root
        #[arg(long)]
        app_dir: Option<PathBuf>,

        /// Override the source root
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Override the report path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Log skipped items and per-group verdicts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a default routegraph.toml
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Check { verbose: true, .. });
    init_logging(verbose);

    // Execute command
    match cli.command {
        Commands::Check {
            config,
            app_dir,
            source_dir,
            output,
            verbose: _,
        } => {
            commands::check::execute(commands::check::CheckArgs {
                config,
                app_dir,
                source_dir,
                output,
            })?;
        }
        Commands::Init { force } => {
            commands::init::execute(force)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so the summary on stdout stays readable
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
