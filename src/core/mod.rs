//! core/mod.rs
//!
//! The brain of the app:
//! - Expand dropped paths into WAV files (`library`)
//! - Hold uploads + their editable tags (`session`)
//! - Read tags (`tags`), convert (`encoder`), package and save (`export`)
//! - Preview audio (`playback`)
//!
//! No iced imports in here. The GUI calls in and renders plain data back out.

pub mod encoder;
pub mod error;
pub mod export;
pub mod library;
pub mod playback;
pub mod session;
pub mod tags;
pub mod types;

use std::collections::BTreeMap;
use std::path::PathBuf;

use library::WavScan;
use types::UploadedFile;

/// Files that made it into the session, plus what was left behind.
#[derive(Debug, Clone, Default)]
pub struct LoadedUploads {
    pub files: Vec<UploadedFile>,
    /// Non-WAV inputs and unreadable folders.
    pub skipped: usize,
    /// WAVs that could not be read: (path, reason).
    pub failed: Vec<(PathBuf, String)>,
}

/// Expand + read uploads. Blocking; run it off the UI thread.
///
/// - Never fails as a whole: each unreadable file is reported and skipped
pub fn load_uploads(inputs: &[PathBuf]) -> LoadedUploads {
    let WavScan { paths, skipped } = library::collect_wavs(inputs);
    let mut out = LoadedUploads {
        skipped,
        ..Default::default()
    };

    for path in paths {
        match UploadedFile::load(&path) {
            Ok(file) => out.files.push(file),
            Err(e) => {
                tracing::warn!("could not read {}: {e}", path.display());
                out.failed.push((path, e.to_string()));
            }
        }
    }

    out
}

/// Keeps upload batches in the order they were requested.
///
/// Each batch is read on its own blocking task, so a small drop can finish
/// before a large one that came first. Completed batches are held back until
/// every earlier one has landed.
#[derive(Debug, Default)]
pub struct UploadQueue {
    next_seq: u64,
    next_apply: u64,
    ready: BTreeMap<u64, LoadedUploads>,
}

impl UploadQueue {
    /// Reserve a slot for a new batch.
    pub fn issue(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Record batch `seq` and drain everything now in order.
    pub fn complete(&mut self, seq: u64, loaded: LoadedUploads) -> Vec<LoadedUploads> {
        if seq < self.next_apply {
            tracing::warn!("upload batch {seq} completed twice; ignored");
            return Vec::new();
        }
        self.ready.insert(seq, loaded);

        let mut out = Vec::new();
        while let Some(batch) = self.ready.remove(&self.next_apply) {
            out.push(batch);
            self.next_apply += 1;
        }
        out
    }

    /// Batches issued but not yet handed out.
    pub fn pending(&self) -> usize {
        (self.next_seq - self.next_apply) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uploads_reads_wavs_and_reports_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.wav");
        let missing = dir.path().join("missing.wav");
        let text = dir.path().join("readme.txt");
        std::fs::write(&good, b"RIFF....WAVE").unwrap();
        std::fs::write(&text, b"hi").unwrap();

        let loaded = load_uploads(&[good.clone(), missing.clone(), text]);

        assert_eq!(loaded.files.len(), 1);
        assert_eq!(loaded.files[0].path, good);
        assert_eq!(&*loaded.files[0].content, b"RIFF....WAVE");
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.failed.len(), 1);
        assert_eq!(loaded.failed[0].0, missing);
    }

    fn batch(names: &[&str]) -> LoadedUploads {
        LoadedUploads {
            files: names
                .iter()
                .map(|n| UploadedFile::new(PathBuf::from(n), b"RIFF".to_vec()))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn later_batch_waits_for_earlier_one() {
        let mut queue = UploadQueue::default();
        let first = queue.issue();
        let second = queue.issue();
        assert_eq!(queue.pending(), 2);

        assert!(queue.complete(second, batch(&["b.wav"])).is_empty());
        assert_eq!(queue.pending(), 2);

        let ready = queue.complete(first, batch(&["a1.wav", "a2.wav"]));
        assert_eq!(queue.pending(), 0);

        let mut session = session::Session::default();
        for loaded in ready {
            session.add_files(loaded.files);
        }
        let names: Vec<_> = session.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a1.wav", "a2.wav", "b.wav"]);
    }

    #[test]
    fn in_order_completion_is_handed_out_immediately() {
        let mut queue = UploadQueue::default();
        let first = queue.issue();
        assert_eq!(queue.complete(first, batch(&["a.wav"])).len(), 1);
        assert!(queue.complete(first, batch(&["a.wav"])).is_empty());

        let second = queue.issue();
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.complete(second, LoadedUploads::default()).len(), 1);
        assert_eq!(queue.pending(), 0);
    }
}
