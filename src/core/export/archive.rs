//! In-memory zip for batch export + entry naming rules.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::core::error::ExportError;

pub const ARCHIVE_NAME: &str = "raamp3_export.zip";

/// `<title>.mp3`, or `<fallback>.mp3` when the title is blank.
/// Path separators and characters Windows rejects in file names become `_`.
pub fn mp3_file_name(title: &str, fallback: &str) -> String {
    let title = title.trim();
    let stem = if title.is_empty() { fallback } else { title };
    let stem: String = stem
        .chars()
        .map(|c| if is_reserved(c) { '_' } else { c })
        .collect();
    format!("{stem}.mp3")
}

fn is_reserved(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// Zip built in memory. MP3s are stored, not deflated.
pub struct Archive {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
}

impl Default for Archive {
    fn default() -> Self {
        Self::new()
    }
}

impl Archive {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
        }
    }

    /// Add an entry. Returns the name actually used (duplicates get " (2)", " (3)", ...).
    pub fn add(&mut self, name: &str, data: &[u8]) -> Result<String, ExportError> {
        let name = self.unique_name(name);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        self.writer.start_file(name.clone(), options)?;
        self.writer.write_all(data)?;
        self.names.insert(name.clone());
        Ok(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains(name) {
            return name.to_string();
        }
        let (stem, ext) = match name.rsplit_once('.') {
            Some((s, e)) => (s, format!(".{e}")),
            None => (name, String::new()),
        };
        (2..)
            .map(|n| format!("{stem} ({n}){ext}"))
            .find(|candidate| !self.names.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn names() {
        assert_eq!(mp3_file_name("", "output"), "output.mp3");
        assert_eq!(mp3_file_name("   ", "track-3"), "track-3.mp3");
        assert_eq!(mp3_file_name("Song", "track-1"), "Song.mp3");
        assert_eq!(mp3_file_name("AC/DC\\Live", "x"), "AC_DC_Live.mp3");
    }

    #[test]
    fn names_are_safe_on_windows() {
        assert_eq!(
            mp3_file_name("What? <Live> \"Part\" 1: A*B|C", "x"),
            "What_ _Live_ _Part_ 1_ A_B_C.mp3"
        );
        assert_eq!(mp3_file_name("tab\there", "x"), "tab_here.mp3");
    }

    #[test]
    fn entries_round_trip_and_duplicates_are_kept() {
        let mut archive = Archive::new();
        assert_eq!(archive.add("Song.mp3", b"one").unwrap(), "Song.mp3");
        assert_eq!(archive.add("Song.mp3", b"two").unwrap(), "Song (2).mp3");
        assert_eq!(archive.add("Song.mp3", b"three").unwrap(), "Song (3).mp3");
        assert_eq!(archive.len(), 3);

        let bytes = archive.finish().unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 3);

        let mut body = String::new();
        zip.by_name("Song (2).mp3")
            .unwrap()
            .read_to_string(&mut body)
            .unwrap();
        assert_eq!(body, "two");
    }
}
