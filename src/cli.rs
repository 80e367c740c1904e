//! Command line surface: argument parsing, default database discovery,
//! overwrite confirmation, log setup and the live progress line.
//!
//! Nothing in here knows about tags or XML; it only produces a
//! [`SyncConfig`] and prints what the core reports.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rhythmsync::core::{SyncConfig, SyncMode, SyncReporter, SyncSummary};
use tracing::{Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// Rhythmbox database location under the user's data dir.
const DEFAULT_DB: &str = "rhythmbox/rhythmdb.xml";

/// Import ID3 ratings (POPM frames) into the Rhythmbox database, or export
/// the database ratings back to the files.
///
/// On import, a POPM frame written by Rhythmbox is preferred; otherwise the
/// first frame set by any other application is used.
#[derive(Debug, Parser)]
#[command(name = "rhythmsync", version, about)]
pub struct Args {
    /// import: files -> database, export: database -> files
    #[arg(value_enum)]
    pub mode: SyncMode,

    /// Rhythmbox database to read [default: ~/.local/share/rhythmbox/rhythmdb.xml]
    #[arg(short, long = "input-file", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where to write the database on import [default: the input file]
    #[arg(short, long = "output-file", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite ratings that already exist at the destination
    #[arg(short, long)]
    pub force: bool,

    /// Show what would change without saving anything
    #[arg(long)]
    pub dry: bool,

    /// Write logs to this file. Without it, logs are discarded.
    #[arg(long, value_name = "FILE", env = "RHYTHMSYNC_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,

    /// Don't ask before overwriting the input database
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            // tracing has nothing above ERROR
            LogLevel::Critical | LogLevel::Error => Level::ERROR,
            LogLevel::Warning => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
        }
    }
}

/// Send logs to `--log-file` (truncated). No file, no subscriber.
pub fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    subscriber(args.log_level, Mutex::new(file)).init();
    Ok(())
}

fn subscriber<W>(level: LogLevel, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level: Level = level.into();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(writer)
        .with_ansi(false)
        .finish()
}

pub fn default_database() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DEFAULT_DB))
}

/// Turn parsed arguments into a [`SyncConfig`], asking before an import
/// would overwrite its own input. `Ok(None)` means the user declined.
pub fn resolve_config(args: &Args) -> Result<Option<SyncConfig>> {
    let input = match &args.input {
        Some(input) => input.clone(),
        None => {
            let Some(path) = default_database().filter(|p| p.is_file()) else {
                bail!(
                    "File \"~/.local/share/{DEFAULT_DB}\" was not found. \
                     Please provide the Rhythmbox database file manually."
                );
            };
            println!(
                "No input file was provided. Using the default one from \"{}\"",
                path.display()
            );
            path
        }
    };

    let mut config = SyncConfig::new(args.mode, input);
    config.force = args.force;
    config.dry = args.dry;
    config.output = args.output.clone();

    if config.mode == SyncMode::Import && config.output.is_none() && !args.yes && !config.dry {
        let stdin = io::stdin();
        let confirmed = confirm(
            "No output file was provided. The input file will be overwritten. Are you sure? (yes/No) ",
            &mut stdin.lock(),
            &mut io::stdout(),
        )?;
        if !confirmed {
            return Ok(None);
        }
    }

    config
        .validate()
        .with_context(|| format!("Cannot use {}", config.input.display()))?;

    Ok(Some(config))
}

/// Only "y" / "yes" (any case) count as agreement.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Rewrites a single status line on stdout as the pass advances.
#[derive(Debug, Default)]
pub struct ProgressLine {
    printed: bool,
}

impl ProgressLine {
    pub fn line(mode: SyncMode, summary: &SyncSummary) -> String {
        let verb = if summary.changed == 1 { "was" } else { "were" };
        match mode {
            SyncMode::Import => format!(
                "{} out of {} library items {verb} updated.",
                summary.changed, summary.items
            ),
            SyncMode::Export => format!(
                "{} files out of {} library items {verb} updated.",
                summary.changed, summary.items
            ),
        }
    }

    /// End the status line.
    pub fn finish(&self) {
        if self.printed {
            println!();
        }
    }
}

impl SyncReporter for ProgressLine {
    fn on_progress(&mut self, mode: SyncMode, summary: &SyncSummary) {
        print!("\r{}", Self::line(mode, summary));
        let _ = io::stdout().flush();
        self.printed = true;
    }
}
