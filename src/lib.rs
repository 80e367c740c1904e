//! rhythmsync
//!
//! Keeps song ratings and play counts in step between a Rhythmbox library
//! database (`rhythmdb.xml`) and the ID3 POPM frames of the MP3 files it
//! points at.
//!
//! - `import`: files -> library database
//! - `export`: library database -> files
//!
//! Everything reusable lives in [`core`]; the `rhythmsync` binary is a thin
//! CLI on top.

pub mod core;
