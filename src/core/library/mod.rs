//! core/library/mod.rs
//!
//! The Rhythmbox library database (`rhythmdb.xml`), held as one element tree.
//!
//! - [`LibraryStore::load`] parses the whole file once.
//! - [`LibraryStore::entries`] hands out [`LibraryEntry`] views over the live tree.
//! - [`LibraryStore::save`] re-indents and writes the whole document back.

mod entry;
mod format;
mod parse;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;
use xmltree::{Element, XMLNode};

use super::error::Result;

pub use entry::LibraryEntry;
pub use entry::{LAST_SEEN, LOCATION, PLAY_COUNT, RATING, TITLE};

#[derive(Debug, Clone)]
pub struct LibraryStore {
    root: Element,
}

impl LibraryStore {
    /// Malformed XML fails with `SyncError::ParseError`, an unreadable file
    /// with `SyncError::Io`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading the database: {}", path.display());
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let root = parse::parse_document(reader)?;
        Ok(Self { root })
    }

    /// Direct `<entry>` children of the root whose `type` attribute is `kind`,
    /// in document order.
    pub fn entries<'a>(&'a mut self, kind: &'a str) -> impl Iterator<Item = LibraryEntry<'a>> {
        self.root
            .children
            .iter_mut()
            .filter_map(|node| match node {
                XMLNode::Element(e) => Some(e),
                _ => None,
            })
            .filter(move |e| is_entry_of(e, kind))
            .map(LibraryEntry::new)
    }

    pub fn count(&self, kind: &str) -> usize {
        self.root
            .children
            .iter()
            .filter(|node| matches!(node, XMLNode::Element(e) if is_entry_of(e, kind)))
            .count()
    }

    /// Write the whole document to `path`, replacing the file.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Writing the database: {}", path.display());
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Re-indent the tree and serialise it with a `standalone="yes"` declaration.
    pub fn write_to<W: Write>(&mut self, writer: W) -> Result<()> {
        format::reformat(&mut self.root, 0);
        format::write_document(&self.root, writer)
    }
}

fn is_entry_of(element: &Element, kind: &str) -> bool {
    element.name == "entry" && element.attributes.get("type").map(String::as_str) == Some(kind)
}
