//! core/file.rs
//! One audio file's rating and play count, as seen through its POPM frames.
//!
//! Loading picks a single frame to treat as authoritative (see
//! [`RatingSource`]); saving only ever rewrites or deletes our own frame, and
//! only ever *adds* one when the rating came from someone else.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::Result;
use super::merge::merge;
use super::rating::{rating_to_stars, stars_to_rating};
use super::tags::{Id3Container, TagContainer};
use super::types::{OWN_LABEL, Popularity, RatingSource};

#[derive(Debug)]
pub struct FileRecord<C: TagContainer = Id3Container> {
    path: PathBuf,
    container: C,
    rating: u8,
    play_count: u64,
    source: RatingSource,
    dirty: bool,
}

impl FileRecord<Id3Container> {
    /// Load the ID3 tag of the MP3 at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let container = Id3Container::open(path.clone())?;
        Ok(Self::from_container(path, container))
    }
}

impl<C: TagContainer> FileRecord<C> {
    pub fn from_container(path: impl Into<PathBuf>, container: C) -> Self {
        let path = path.into();
        let mut pops = container.popularities();

        let (source, current) = if let Some(i) = pops.iter().position(|(l, _)| l == OWN_LABEL) {
            (RatingSource::Owned, pops.swap_remove(i).1)
        } else if pops.is_empty() {
            (RatingSource::None, Popularity::default())
        } else {
            let others = pops.len();
            let (label, popularity) = pops.swap_remove(0);
            if others > 1 {
                info!(
                    "Multiple ratings were found for {}. Getting from the first one ({label})",
                    path.display()
                );
            } else {
                info!("Getting the rating from {label} for {}", path.display());
            }
            (RatingSource::Foreign(label), popularity)
        };

        Self {
            path,
            container,
            rating: current.rating,
            play_count: current.play_count,
            source,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn play_count(&self) -> u64 {
        self.play_count
    }

    pub fn source(&self) -> &RatingSource {
        &self.source
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn stars(&self) -> u8 {
        // A u8 is always inside the 0..=255 domain.
        rating_to_stars(i64::from(self.rating)).unwrap_or(0)
    }

    /// Returns whether the in-memory value changed.
    pub fn set_rating(&mut self, rating: u8, force: bool) -> bool {
        let merged = merge(self.rating, rating, force);
        self.rating = merged.value;
        self.dirty |= merged.changed;
        merged.changed
    }

    pub fn set_play_count(&mut self, play_count: u64, force: bool) -> bool {
        let merged = merge(self.play_count, play_count, force);
        self.play_count = merged.value;
        self.dirty |= merged.changed;
        merged.changed
    }

    /// Fails with `InvalidInput` for anything outside 0..=5.
    pub fn set_stars(&mut self, stars: i64, force: bool) -> Result<bool> {
        let rating = stars_to_rating(stars)?;
        Ok(self.set_rating(rating, force))
    }

    /// Whether [`save`](Self::save) would write anything right now.
    pub fn would_write(&self) -> bool {
        match self.source {
            RatingSource::Owned => self.dirty,
            RatingSource::Foreign(_) | RatingSource::None => self.rating != 0,
        }
    }

    /// Persist the in-memory rating and play count. Returns whether the file
    /// was written.
    ///
    /// - Owned source: written only when dirty. A zero rating deletes our frame.
    /// - Foreign/no source: a non-zero rating is written under our own label,
    ///   whether dirty or not; a zero rating writes nothing.
    pub fn save(&mut self) -> Result<bool> {
        if !self.would_write() {
            debug!("Nothing to write for {}", self.path.display());
            return Ok(false);
        }

        let popularity = Popularity {
            rating: self.rating,
            play_count: self.play_count,
        };

        match self.source {
            RatingSource::Owned => {
                if self.rating == 0 {
                    self.container.remove_popularity(OWN_LABEL);
                } else {
                    self.container.set_popularity(OWN_LABEL, popularity);
                }
                self.container.commit()?;
                self.dirty = false;
            }
            RatingSource::Foreign(_) | RatingSource::None => {
                self.container.set_popularity(OWN_LABEL, popularity);
                self.container.commit()?;
            }
        }

        Ok(true)
    }
}
