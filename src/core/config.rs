//! core/config.rs
//! Resolved sync configuration.
//!
//! The CLI (or any other front end) does the argv parsing, default path
//! discovery and confirmation prompts; the core only ever sees a finished
//! [`SyncConfig`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use tracing::warn;

use super::error::{Result, SyncError};

/// Direction of a sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SyncMode {
    /// Files -> library database.
    Import,
    /// Library database -> files.
    Export,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Import => f.write_str("import"),
            SyncMode::Export => f.write_str("export"),
        }
    }
}

impl FromStr for SyncMode {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "import" => Ok(SyncMode::Import),
            "export" => Ok(SyncMode::Export),
            other => Err(SyncError::InvalidInput(format!("unknown mode: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub mode: SyncMode,
    /// Library database to read.
    pub input: PathBuf,
    /// Where an import writes the database; `None` overwrites `input`.
    pub output: Option<PathBuf>,
    /// Overwrite values that are already set on the destination side.
    pub force: bool,
    /// Compute and report everything, persist nothing.
    pub dry: bool,
}

impl SyncConfig {
    pub fn new(mode: SyncMode, input: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            input: input.into(),
            output: None,
            force: false,
            dry: false,
        }
    }

    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    /// Checks that the configuration can run at all.
    pub fn validate(&self) -> Result<()> {
        if !self.input.is_file() {
            return Err(SyncError::NotFound(self.input.clone()));
        }

        if self.mode == SyncMode::Export {
            if let Some(output) = &self.output {
                warn!(
                    "Output file {} is ignored when exporting",
                    output.display()
                );
            }
        }

        Ok(())
    }
}
