//! core/error.rs
//! Error type shared by every core module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`SyncError`]
pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    /// A value outside the domain of a conversion (stars, rating).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The audio file is missing or cannot be opened.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but carries no usable ID3 tag.
    #[error("Unsupported file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The library database is not well-formed XML.
    #[error("Malformed library database: {0}")]
    ParseError(#[from] xmltree::ParseError),

    /// Writing a tag back to its file failed.
    #[error("Failed to write tag to {}: {source}", path.display())]
    Tag {
        path: PathBuf,
        #[source]
        source: id3::Error,
    },

    /// Serialising the library database failed.
    #[error("Failed to write library database: {0}")]
    Xml(#[from] xmltree::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
