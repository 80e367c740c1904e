//! core/sync.rs
//! One sync pass over every song in the library.
//!
//! - Entries are processed strictly one after another.
//! - A file that can't be opened (or has no tag) is logged and skipped; the
//!   pass carries on.
//! - Export commits each file as soon as it is processed. Import only touches
//!   the in-memory tree, which is written once at the very end.
//! - `dry` runs every comparison and counts exactly what a real run would,
//!   but writes nothing.

use std::path::Path;

use tracing::{debug, info, warn};

use super::config::{SyncConfig, SyncMode};
use super::error::{Result, SyncError};
use super::file::FileRecord;
use super::library::{LibraryEntry, LibraryStore};
use super::rating::{rating_to_stars, stars_to_rating};
use super::types::{SONG_KIND, SyncSummary};

/// Receives progress as the pass runs. Front ends use this for their status line.
pub trait SyncReporter {
    /// Called after every entry whose file could be opened, once its
    /// outcome is counted.
    fn on_progress(&mut self, mode: SyncMode, summary: &SyncSummary);
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl SyncReporter for NoopReporter {
    fn on_progress(&mut self, _mode: SyncMode, _summary: &SyncSummary) {}
}

/// Run one pass in the configured direction and, for a non-dry import, write
/// the database to [`SyncConfig::output_path`].
///
/// Only database-level failures (writing the output) are returned as errors.
/// Per-entry failures are logged and counted in [`SyncSummary::skipped`] when
/// the file couldn't be opened at all.
pub fn run(
    store: &mut LibraryStore,
    config: &SyncConfig,
    reporter: &mut dyn SyncReporter,
) -> Result<SyncSummary> {
    let mut summary = SyncSummary::default();

    match config.mode {
        SyncMode::Import => info!("Importing the ratings to the library..."),
        SyncMode::Export => info!("Exporting the ratings to the files..."),
    }

    for mut entry in store.entries(SONG_KIND) {
        let Some(path) = entry.path() else {
            warn!(
                "Entry {:?} has no location. Ignoring.",
                entry.title().unwrap_or_default()
            );
            summary.skipped += 1;
            continue;
        };

        debug!("Loading {}", path.display());
        let mut file = match FileRecord::open(&path) {
            Ok(file) => file,
            Err(e) => {
                skip(&path, &e);
                summary.skipped += 1;
                continue;
            }
        };

        summary.items += 1;

        let outcome = match config.mode {
            SyncMode::Import => import_entry(&mut entry, &file, config.force),
            SyncMode::Export => export_entry(&entry, &mut file, config),
        };

        match outcome {
            Ok(true) => summary.changed += 1,
            Ok(false) => {}
            Err(e) => skip(&path, &e),
        }
        reporter.on_progress(config.mode, &summary);
    }

    if config.mode == SyncMode::Import && !config.dry {
        store.save(config.output_path())?;
        info!("Library written to {}", config.output_path().display());
    }

    Ok(summary)
}

fn skip(path: &Path, err: &SyncError) {
    match err {
        SyncError::NotFound(_) => {
            warn!("File {} was not found. Ignoring.", path.display())
        }
        SyncError::UnsupportedFormat(_) => {
            warn!("Unsupported file type {}. Ignoring.", path.display())
        }
        other => warn!("Skipping {}: {}", path.display(), other),
    }
}

/// File -> entry. The file's rating is snapped onto its star value first, so
/// the database only ever holds one of the six canonical ratings.
fn import_entry(entry: &mut LibraryEntry<'_>, file: &FileRecord, force: bool) -> Result<bool> {
    let rating = stars_to_rating(i64::from(file.stars()))?;

    let rating_changed = entry.set_rating(rating, force);
    let count_changed = entry.set_play_count(file.play_count(), force);

    let title = entry.title().unwrap_or_default();
    if rating_changed || count_changed {
        info!(
            "{title:?} was updated. Rating: {}, Play count: {}",
            entry.rating(),
            entry.play_count()
        );
        Ok(true)
    } else {
        info!("{title:?} already has a rating in the library.");
        Ok(false)
    }
}

/// Entry -> file. Returns whether the file was (or, dry, would be) written.
fn export_entry(entry: &LibraryEntry<'_>, file: &mut FileRecord, config: &SyncConfig) -> Result<bool> {
    let stars = rating_to_stars(entry.rating())?;
    file.set_stars(i64::from(stars), config.force)?;
    file.set_play_count(entry.play_count(), config.force);

    let written = if config.dry {
        file.would_write()
    } else {
        file.save()?
    };

    if written {
        let verb = if config.dry { "would be" } else { "was" };
        info!(
            "{} {verb} updated. Rating: {}, Play count: {}",
            file.path().display(),
            file.rating(),
            file.play_count()
        );
    }
    Ok(written)
}
