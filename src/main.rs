//! rhythmsync CLI
//!
//! # What this program is
//! A small command line tool that copies song ratings and play counts between
//! the Rhythmbox library database (`rhythmdb.xml`) and the ID3 POPM frames
//! stored inside the MP3 files.
//!
//! - `rhythmsync import`: files -> database
//! - `rhythmsync export`: database -> files
//!
//! # How a run goes
//! 1. Parse argv, pick the default database if none was given.
//! 2. Set up logging (only when `--log-file` is given).
//! 3. Import without `--output-file`: ask before overwriting the input.
//! 4. Load the database, run one pass, print a live counter.
//! 5. Import: write the database once at the end (never with `--dry`).
//!
//! # Architecture constraints (on purpose)
//! - All tag/XML/merge logic lives in `rhythmsync::core`.
//! - This binary only does IO with the user: argv, prompt, stdout.

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rhythmsync::core::{LibraryStore, SyncMode, sync};
use tracing::{debug, info};

use crate::cli::{Args, ProgressLine};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    // Before resolving, so warnings from validation end up in the log.
    cli::init_logging(args)?;

    let Some(config) = cli::resolve_config(args)? else {
        // User declined to overwrite the input database.
        return Ok(ExitCode::SUCCESS);
    };

    debug!("Resolved configuration: {config:?}");

    let mut store = LibraryStore::load(&config.input)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    match config.mode {
        SyncMode::Import => println!("Importing the ratings to the library..."),
        SyncMode::Export => println!("Exporting the ratings to the files..."),
    }

    let mut progress = ProgressLine::default();
    let result = sync::run(&mut store, &config, &mut progress);
    progress.finish();

    let summary = result.with_context(|| {
        format!(
            "Failed to write the database to {}",
            config.output_path().display()
        )
    })?;

    info!("Done: {summary} ({} skipped)", summary.skipped);
    if config.dry {
        println!("Dry run: nothing was saved.");
    }

    Ok(ExitCode::SUCCESS)
}
