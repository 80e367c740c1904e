//! core/tags/mod.rs
//!
//! Popularimeter (POPM) access on top of the `id3` crate.
//! Public API:
//! - [`TagContainer`]: what a [`FileRecord`](super::file::FileRecord) needs from a tag.
//! - [`Id3Container`]: the real implementation, one MP3 file and its ID3v2 tag.

mod read;
mod write;

use std::path::PathBuf;

use id3::Tag;

use super::error::Result;
use super::types::Popularity;

/// A set of popularimeter frames keyed by their user string, plus a way to
/// persist it.
pub trait TagContainer {
    /// Every POPM frame, in the order they appear in the tag.
    fn popularities(&self) -> Vec<(String, Popularity)>;

    /// Add or replace the frame under `label`. Other labels are untouched.
    fn set_popularity(&mut self, label: &str, popularity: Popularity);

    /// Remove the frame under `label`, if any. Other labels are untouched.
    fn remove_popularity(&mut self, label: &str);

    /// Write the current frames back to storage.
    fn commit(&mut self) -> Result<()>;
}

/// An MP3's ID3v2 tag, loaded in memory and written back on [`commit`](TagContainer::commit).
#[derive(Debug)]
pub struct Id3Container {
    path: PathBuf,
    tag: Tag,
}

impl Id3Container {
    /// Load the tag of the file at `path`.
    ///
    /// - missing/unreadable file -> `SyncError::NotFound`
    /// - no ID3v2 tag, or one that can't be decoded -> `SyncError::UnsupportedFormat`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tag = read::read_tag(&path)?;
        Ok(Self { path, tag })
    }
}

impl TagContainer for Id3Container {
    fn popularities(&self) -> Vec<(String, Popularity)> {
        read::popularities(&self.tag)
    }

    fn set_popularity(&mut self, label: &str, popularity: Popularity) {
        write::set_popularity(&mut self.tag, label, popularity);
    }

    fn remove_popularity(&mut self, label: &str) {
        write::remove_popularity(&mut self.tag, label);
    }

    fn commit(&mut self) -> Result<()> {
        write::write_tag(&self.tag, &self.path)
    }
}
