//! core/tags/read.rs
//! Read ID3 tags from an uploaded payload and map them into `TagMetadata`.
//!
//! - Works on bytes, not paths: the upload flow already holds the content.
//! - `id3` sniffs the container (RIFF/WAVE `id3 ` chunk, or a plain ID3v2 stream).
//! - Missing frames become empty strings; nothing here is fatal for the caller.

use std::io::Cursor;

use id3::frame::Content;
use id3::{Tag, TagLike};

use super::super::error::TagError;
use super::super::types::TagMetadata;
use super::art::front_cover;
use super::util::{number_or_empty, year_from_date_text};

pub fn extract_metadata(bytes: &[u8]) -> Result<TagMetadata, TagError> {
    let tag = Tag::read_from2(Cursor::new(bytes))?;
    Ok(build_metadata_from_tag(&tag))
}

/// Extraction that never fails: on any error, all fields are defaulted.
pub fn extract_or_default(bytes: &[u8]) -> TagMetadata {
    match extract_metadata(bytes) {
        Ok(meta) => meta,
        Err(e) => {
            tracing::debug!("no readable tags ({e}); proceeding with empty fields");
            TagMetadata::default()
        }
    }
}

fn build_metadata_from_tag(tag: &Tag) -> TagMetadata {
    let year = tag
        .year()
        .map(|y| y.to_string())
        .or_else(|| text_frame(tag, "TDRC").and_then(|s| year_from_date_text(&s)))
        .unwrap_or_default();

    // Keep "3/12" as typed; fall back to the parsed number if TRCK is odd.
    let track = text_frame(tag, "TRCK")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| number_or_empty(tag.track()));

    TagMetadata {
        title: tag.title().map(str::to_owned).unwrap_or_default(),
        artist: tag.artist().map(str::to_owned).unwrap_or_default(),
        album: tag.album().map(str::to_owned).unwrap_or_default(),
        year,
        genre: text_frame(tag, "TCON").unwrap_or_default(),
        track,
        composer: text_frame(tag, "TCOM").unwrap_or_default(),
        picture: front_cover(tag),
    }
}

/// Get a best-effort string value from a text frame id.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use id3::Version;
    use id3::frame::{Picture, PictureType};

    use super::*;
    use crate::core::types::TagField;

    fn tagged_stream(tag: &Tag) -> Vec<u8> {
        let mut buf = Vec::new();
        tag.write_to(&mut buf, Version::Id3v23).unwrap();
        buf
    }

    #[test]
    fn maps_all_seven_fields_and_cover() {
        let mut tag = Tag::new();
        tag.set_title("Song");
        tag.set_artist("A");
        tag.set_album("Record");
        tag.set_year(1999);
        tag.set_genre("Jazz");
        tag.set_text("TRCK", "3/12");
        tag.set_text("TCOM", "C");
        tag.add_frame(Picture {
            mime_type: "image/png".to_string(),
            picture_type: PictureType::CoverFront,
            description: String::new(),
            data: vec![0x89, b'P', b'N', b'G'],
        });

        let meta = extract_metadata(&tagged_stream(&tag)).unwrap();

        assert_eq!(meta.title, "Song");
        assert_eq!(meta.artist, "A");
        assert_eq!(meta.album, "Record");
        assert_eq!(meta.year, "1999");
        assert_eq!(meta.genre, "Jazz");
        assert_eq!(meta.track, "3/12");
        assert_eq!(meta.composer, "C");

        let pic = meta.picture.unwrap();
        assert_eq!(pic.mime, "image/png");
        assert_eq!(pic.data, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn missing_frames_become_empty_strings() {
        let mut tag = Tag::new();
        tag.set_title("Only title");

        let meta = extract_metadata(&tagged_stream(&tag)).unwrap();
        assert_eq!(meta.title, "Only title");
        for field in TagField::ALL.into_iter().filter(|f| *f != TagField::Title) {
            assert_eq!(meta.field(field), "", "{field:?}");
        }
        assert!(meta.picture.is_none());
    }

    #[test]
    fn reads_id3_chunk_inside_riff_wave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.wav");
        std::fs::write(&path, crate::core::playback::testing::pcm_wav(8_000, 800)).unwrap();

        let mut tag = Tag::new();
        tag.set_title("InWav");
        tag.set_artist("A");
        tag.write_to_wav_path(&path, Version::Id3v23).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");

        let meta = extract_metadata(&bytes).unwrap();
        assert_eq!(meta.title, "InWav");
        assert_eq!(meta.artist, "A");
        assert_eq!(meta.album, "");
        assert!(meta.picture.is_none());
    }

    #[test]
    fn unreadable_payload_falls_back_to_defaults() {
        let garbage = b"RIFF\x04\x00\x00\x00WAVEnot really a wav".to_vec();
        assert!(extract_metadata(&garbage).is_err());
        assert_eq!(extract_or_default(&garbage), TagMetadata::default());
        assert_eq!(extract_or_default(&[]), TagMetadata::default());
    }
}
