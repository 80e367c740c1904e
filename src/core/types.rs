//! Core data types shared between the records, the sync driver and the CLI.
//!
//! Rule of thumb:
//! - These are "boring bags of data"
//! - No filesystem code
//! - No tag or XML parsing code

use std::fmt;

/// POPM user string this tool writes under, and treats as "ours" when reading.
pub const OWN_LABEL: &str = "Rhythmbox";

/// Library entry kind the sync pass works on.
pub const SONG_KIND: &str = "song";

/// One popularimeter payload: the rating byte plus its play counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Popularity {
    /// 0 means "not rated".
    pub rating: u8,
    /// 0 means "unknown".
    pub play_count: u64,
}

/// Where a file's current rating came from when it was loaded.
///
/// Saving depends on this: frames under [`OWN_LABEL`] may be rewritten or
/// deleted, anyone else's frames are only ever added to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingSource {
    /// A frame under [`OWN_LABEL`].
    Owned,
    /// Some other application's frame, picked because no owned one existed.
    Foreign(String),
    /// The file had no popularimeter frames at all.
    None,
}

/// Running totals of a sync pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Entries whose file could be opened.
    pub items: usize,
    /// Entries (import) or files (export) that were, or would be, updated.
    pub changed: usize,
    /// Entries skipped because of a per-file failure.
    pub skipped: usize,
}

impl fmt::Display for SyncSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.changed == 1 { "was" } else { "were" };
        write!(
            f,
            "{} out of {} library items {verb} updated",
            self.changed, self.items
        )
    }
}
