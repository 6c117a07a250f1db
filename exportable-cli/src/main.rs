//! Exportable command-line tool
//!
//! Prints the demo building as JSON, or imports a document as a building and
//! exports it again to show what survives the trip.
//!
//! Usage:
//!   exportable sample --indent 2
//!   exportable roundtrip building.json --check

use std::{fs, path::{Path, PathBuf}};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use exportable_cli::{render_sample, roundtrip};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "exportable")]
#[command(about = "Export and re-import typed instance graphs as JSON")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the demo building as JSON
    Sample {
        /// Spaces per indent level (clamped to 10)
        #[arg(short, long)]
        indent: Option<usize>,
    },
    /// Import a JSON document as a building and print its re-export
    Roundtrip {
        /// Input file, or `-` for stdin
        path: PathBuf,

        /// Spaces per indent level (clamped to 10)
        #[arg(short, long)]
        indent: Option<usize>,

        /// Fail if the re-export differs from the input
        #[arg(long)]
        check: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match args.command {
        Command::Sample { indent } => {
            println!("{}", render_sample(indent)?);
        }
        Command::Roundtrip {
            path,
            indent,
            check,
        } => {
            let text = read_input(&path)?;
            let result = roundtrip(&text, indent)?;
            println!("{}", result.output);
            if result.lossless {
                info!("Round trip of {} is lossless", path.display());
            } else if check {
                bail!("round trip of {} is lossy", path.display());
            } else {
                warn!("Round trip of {} is lossy", path.display());
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
