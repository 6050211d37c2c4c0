//! Core data types shared between core logic and the UI.
//!
//! Rule of thumb:
//! - These structs are boring bags of data
//! - No GUI code
//! - No tag parsing code
//!
//! `UploadedFile` is ONE dropped WAV (identity + bytes + where it came from).
//! `TagMetadata` is the editable tag set that gets burned into the MP3.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

/// Stable identity for an uploaded file.
/// Generated at upload time; never reused within a session.
pub type FileId = Uuid;

/// One uploaded WAV.
///
/// - `content` is shared (`Arc`) so export tasks can hold it without copying.
/// - `path` is the playback reference: the preview engine opens it directly.
#[derive(Clone)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub path: PathBuf,
    pub content: Arc<[u8]>,
}

impl UploadedFile {
    pub fn new(path: PathBuf, content: Vec<u8>) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled.wav".to_string());

        Self {
            id: Uuid::new_v4(),
            name,
            path,
            content: content.into(),
        }
    }

    /// Read a file from disk into an `UploadedFile`. Blocking.
    pub fn load(path: &Path) -> io::Result<Self> {
        let content = std::fs::read(path)?;
        Ok(Self::new(path.to_path_buf(), content))
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("path", &self.path)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// Embedded cover image.
#[derive(Clone, PartialEq, Eq)]
pub struct Picture {
    pub data: Vec<u8>,
    /// MIME type, e.g. "image/jpeg".
    pub mime: String,
}

impl fmt::Debug for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picture")
            .field("mime", &self.mime)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// The seven editable text fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Artist,
    Album,
    Year,
    Track,
    Genre,
    Composer,
}

impl TagField {
    pub const ALL: [TagField; 7] = [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::Year,
        TagField::Track,
        TagField::Genre,
        TagField::Composer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TagField::Title => "Title",
            TagField::Artist => "Artist",
            TagField::Album => "Album",
            TagField::Year => "Year",
            TagField::Track => "Track",
            TagField::Genre => "Genre",
            TagField::Composer => "Composer",
        }
    }
}

/// Editable tag set for one file.
///
/// Every text field is always a `String` (empty = not set), never `Option`:
/// the form binds straight to these and the encoder writes all seven.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub track: String,
    pub composer: String,
    pub picture: Option<Picture>,
}

impl TagMetadata {
    pub fn field(&self, field: TagField) -> &str {
        match field {
            TagField::Title => &self.title,
            TagField::Artist => &self.artist,
            TagField::Album => &self.album,
            TagField::Year => &self.year,
            TagField::Track => &self.track,
            TagField::Genre => &self.genre,
            TagField::Composer => &self.composer,
        }
    }

    pub fn set_field(&mut self, field: TagField, value: String) {
        let slot = match field {
            TagField::Title => &mut self.title,
            TagField::Artist => &mut self.artist,
            TagField::Album => &mut self.album,
            TagField::Year => &mut self.year,
            TagField::Track => &mut self.track,
            TagField::Genre => &mut self.genre,
            TagField::Composer => &mut self.composer,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_touches_only_that_field() {
        let mut meta = TagMetadata {
            title: "t".into(),
            artist: "a".into(),
            album: "al".into(),
            year: "1999".into(),
            genre: "g".into(),
            track: "1".into(),
            composer: "c".into(),
            picture: None,
        };

        for field in TagField::ALL {
            let before = meta.clone();
            meta.set_field(field, format!("new {}", field.label()));

            for other in TagField::ALL {
                if other == field {
                    assert_eq!(meta.field(other), format!("new {}", field.label()));
                } else {
                    assert_eq!(meta.field(other), before.field(other));
                }
            }
        }
    }

    #[test]
    fn uploaded_file_takes_name_from_path() {
        let f = UploadedFile::new(PathBuf::from("/tmp/take 1.wav"), vec![1, 2, 3]);
        assert_eq!(f.name, "take 1.wav");
        assert_eq!(f.content.len(), 3);

        let g = UploadedFile::new(PathBuf::from("/tmp/take 1.wav"), vec![]);
        assert_ne!(f.id, g.id);
    }
}
