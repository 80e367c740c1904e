//! core/tags/read.rs
//! Read the ID3 tag of a file and pull out its POPM frames.

use std::fs::{self, File};
use std::path::Path;

use id3::frame::Content;
use id3::Tag;
use tracing::debug;

use super::super::error::{Result, SyncError};
use super::super::types::Popularity;

/// The path must name a readable regular file; anything else is `NotFound`.
/// A file that opens but has no decodable ID3v2 tag is `UnsupportedFormat`.
pub(super) fn read_tag(path: &Path) -> Result<Tag> {
    let readable = fs::metadata(path).is_ok_and(|m| m.is_file()) && File::open(path).is_ok();
    if !readable {
        debug!("Could not open {}", path.display());
        return Err(SyncError::NotFound(path.to_path_buf()));
    }

    Tag::read_from_path(path).map_err(|e| {
        debug!("No usable ID3 tag in {}: {}", path.display(), e);
        SyncError::UnsupportedFormat(path.to_path_buf())
    })
}

/// All POPM frames as (user, popularity), in tag order.
///
/// A user string that appears twice keeps its first frame only.
pub(super) fn popularities(tag: &Tag) -> Vec<(String, Popularity)> {
    let mut out: Vec<(String, Popularity)> = Vec::new();

    for frame in tag.frames() {
        if frame.id() != "POPM" {
            continue;
        }
        let Content::Popularimeter(p) = frame.content() else {
            continue;
        };
        if out.iter().any(|(user, _)| *user == p.user) {
            continue;
        }
        out.push((
            p.user.clone(),
            Popularity {
                rating: p.rating,
                play_count: p.counter,
            },
        ));
    }

    out
}
