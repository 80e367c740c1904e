//! core/tags/write.rs
//! Mutate POPM frames in an in-memory tag and write the tag back to its MP3.

use std::path::Path;

use id3::frame::{Content, Popularimeter};
use id3::{Frame, Tag, TagLike};

use super::super::error::{Result, SyncError};
use super::super::types::Popularity;

fn is_popm_for(frame: &Frame, label: &str) -> bool {
    matches!(frame.content(), Content::Popularimeter(p) if p.user == label)
}

/// Helper: take every POPM frame out, put back the ones not under `label`.
fn retain_other_popms(tag: &mut Tag, label: &str) {
    let removed = tag.remove("POPM"); // Vec<Frame>, tag order
    for frame in removed {
        if !is_popm_for(&frame, label) {
            let _ = tag.add_frame(frame);
        }
    }
}

pub(super) fn set_popularity(tag: &mut Tag, label: &str, popularity: Popularity) {
    retain_other_popms(tag, label);
    let _ = tag.add_frame(Frame::with_content(
        "POPM",
        Content::Popularimeter(Popularimeter {
            user: label.to_string(),
            rating: popularity.rating,
            counter: popularity.play_count,
        }),
    ));
}

pub(super) fn remove_popularity(tag: &mut Tag, label: &str) {
    retain_other_popms(tag, label);
}

/// Write back using the version the tag was read as.
pub(super) fn write_tag(tag: &Tag, path: &Path) -> Result<()> {
    tag.write_to_path(path, tag.version())
        .map_err(|source| SyncError::Tag {
            path: path.to_path_buf(),
            source,
        })
}
