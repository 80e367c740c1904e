#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use id3::frame::{Content, Popularimeter};
use id3::{Frame, Tag, TagLike, Version};
use url::Url;

/// A few bytes of MPEG frame header, enough to stand in for audio data.
const FAKE_AUDIO: [u8; 8] = [0xFF, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00];

/// Create an MP3 at `dir/name` with an ID3v2.4 tag holding the given POPM
/// frames (user, rating, counter).
pub fn tagged_mp3(dir: &Path, name: &str, popms: &[(&str, u8, u64)]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, FAKE_AUDIO).unwrap();

    let mut tag = Tag::new();
    tag.set_title(name.trim_end_matches(".mp3"));
    for &(user, rating, counter) in popms {
        let _ = tag.add_frame(Frame::with_content(
            "POPM",
            Content::Popularimeter(Popularimeter {
                user: user.to_string(),
                rating,
                counter,
            }),
        ));
    }
    tag.write_to_path(&path, Version::Id3v24).unwrap();
    path
}

/// An MP3 with no ID3 tag at all.
pub fn untagged_mp3(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, FAKE_AUDIO).unwrap();
    path
}

/// POPM frames currently stored in the file, in tag order.
pub fn popms(path: &Path) -> Vec<(String, u8, u64)> {
    let tag = Tag::read_from_path(path).unwrap();
    tag.frames()
        .filter_map(|f| match f.content() {
            Content::Popularimeter(p) => Some((p.user.clone(), p.rating, p.counter)),
            _ => None,
        })
        .collect()
}

pub fn location(path: &Path) -> String {
    Url::from_file_path(path).unwrap().to_string()
}

/// Minimal Rhythmbox database: one `<entry type="song">` per (path, extra xml).
pub fn database(songs: &[(&Path, &str)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" standalone=\"yes\"?>\n<rhythmdb version=\"2.0\">\n");
    xml.push_str("  <entry type=\"iradio\">\n    <title>Some Radio</title>\n  </entry>\n");
    for (path, extra) in songs {
        let title = path.file_stem().unwrap().to_string_lossy();
        xml.push_str(&format!(
            "  <entry type=\"song\">\n    <title>{title}</title>\n    <location>{}</location>\n    <last-seen>1700000000</last-seen>\n{extra}  </entry>\n",
            location(path)
        ));
    }
    xml.push_str("</rhythmdb>\n");
    xml
}

pub fn write_database(dir: &Path, songs: &[(&Path, &str)]) -> PathBuf {
    let path = dir.join("rhythmdb.xml");
    fs::write(&path, database(songs)).unwrap();
    path
}
