//! core/library/entry.rs
//! A mutable view over one `<entry>` element of the library database.
//!
//! Fields are child elements holding text:
//!
//! ```xml
//! <entry type="song">
//!   <title>Heroes</title>
//!   <location>file:///music/Bowie/Heroes.mp3</location>
//!   <last-seen>1700000000</last-seen>
//!   <rating>196</rating>
//!   <play-count>12</play-count>
//! </entry>
//! ```
//!
//! A numeric field equal to zero is never stored: it is either absent, or
//! holds a non-zero integer.

use std::borrow::Cow;
use std::path::PathBuf;

use tracing::warn;
use url::Url;
use xmltree::{Element, XMLNode};

pub const TITLE: &str = "title";
pub const LOCATION: &str = "location";
pub const RATING: &str = "rating";
pub const PLAY_COUNT: &str = "play-count";
/// New fields are inserted right after this one when it exists.
pub const LAST_SEEN: &str = "last-seen";

#[derive(Debug)]
pub struct LibraryEntry<'a> {
    element: &'a mut Element,
}

impl<'a> LibraryEntry<'a> {
    pub fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    /// Text of the named child, `None` when the child is missing.
    pub fn field(&self, name: &str) -> Option<String> {
        self.element
            .get_child(name)
            .map(|child| child.get_text().map(Cow::into_owned).unwrap_or_default())
    }

    pub fn title(&self) -> Option<String> {
        self.field(TITLE)
    }

    /// File path decoded from the `location` URI.
    pub fn path(&self) -> Option<PathBuf> {
        self.field(LOCATION).map(|uri| uri_to_path(&uri))
    }

    /// Stored rating, 0 when unset. Kept wide so out-of-range values in a
    /// hand-edited database surface as conversion errors instead of wrapping.
    pub fn rating(&self) -> i64 {
        self.numeric_field(RATING)
    }

    pub fn play_count(&self) -> u64 {
        self.numeric_field(PLAY_COUNT)
    }

    pub fn set_title(&mut self, title: Option<&str>, force: bool) -> bool {
        self.set_field(TITLE, title, force)
    }

    pub fn set_rating(&mut self, rating: u8, force: bool) -> bool {
        let value = (rating != 0).then(|| rating.to_string());
        self.set_field(RATING, value.as_deref(), force)
    }

    pub fn set_play_count(&mut self, play_count: u64, force: bool) -> bool {
        let value = (play_count != 0).then(|| play_count.to_string());
        self.set_field(PLAY_COUNT, value.as_deref(), force)
    }

    /// Set (or with `force`, clear) the text of a child element. Returns
    /// whether the tree changed.
    ///
    /// - child present, no `force`: untouched
    /// - child present, `force`, empty value: child removed
    /// - child present, `force`, same text: untouched
    /// - child missing, empty value: nothing to add
    /// - child missing: new child after `last-seen`, or at the end
    pub fn set_field(&mut self, name: &str, value: Option<&str>, force: bool) -> bool {
        let value = value.filter(|v| !v.is_empty());

        match self.child_index(name) {
            Some(i) => {
                if !force {
                    return false;
                }
                let Some(value) = value else {
                    self.element.children.remove(i);
                    return true;
                };
                if self.field(name).as_deref() == Some(value) {
                    return false;
                }
                if let XMLNode::Element(child) = &mut self.element.children[i] {
                    child.children = vec![XMLNode::Text(value.to_string())];
                }
                true
            }
            None => {
                let Some(value) = value else {
                    return false;
                };

                let mut child = Element::new(name);
                child.children.push(XMLNode::Text(value.to_string()));

                let node = XMLNode::Element(child);
                match self.child_index(LAST_SEEN) {
                    Some(anchor) => self.element.children.insert(anchor + 1, node),
                    None => self.element.children.push(node),
                }
                true
            }
        }
    }

    fn child_index(&self, name: &str) -> Option<usize> {
        self.element
            .children
            .iter()
            .position(|node| matches!(node, XMLNode::Element(e) if e.name == name))
    }

    fn numeric_field<T>(&self, name: &str) -> T
    where
        T: std::str::FromStr + Default,
    {
        let Some(text) = self.field(name) else {
            return T::default();
        };
        match text.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!("Ignoring non-numeric <{name}> value {text:?}");
                T::default()
            }
        }
    }
}

/// Path component of a URI, percent-decoded.
/// Ex: "file:///music/A%20Song.mp3" -> "/music/A Song.mp3"
///
/// Something that doesn't parse as an absolute URI is decoded as-is.
pub(crate) fn uri_to_path(uri: &str) -> PathBuf {
    let raw = match Url::parse(uri) {
        Ok(url) => url.path().to_string(),
        Err(_) => uri.to_string(),
    };

    match urlencoding::decode(&raw) {
        Ok(decoded) => PathBuf::from(decoded.into_owned()),
        Err(_) => {
            let bytes = urlencoding::decode_binary(raw.as_bytes());
            PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}
