//! core/mod.rs
//!
//! The brain of the tool:
//! - Convert between star and POPM rating scales
//! - Decide whether an incoming value may overwrite an existing one
//! - Read/write POPM frames on files, and fields on library entries
//! - Run a sync pass and count what changed
//!
//! No argv parsing, no logging setup, no prompts. Front ends build a
//! [`SyncConfig`] and call [`sync::run`] (or use the records directly).

pub mod config;
pub mod error;
pub mod file;
pub mod library;
pub mod merge;
pub mod rating;
pub mod sync;
pub mod tags;
pub mod types;

pub use config::{SyncConfig, SyncMode};
pub use error::{Result, SyncError};
pub use file::FileRecord;
pub use library::{LibraryEntry, LibraryStore};
pub use sync::{NoopReporter, SyncReporter};
pub use types::{OWN_LABEL, Popularity, RatingSource, SONG_KIND, SyncSummary};
