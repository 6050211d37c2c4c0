//! Small pure helper functions used by the GUI.
//! - no UI widgets or state mutation

use crate::core::LoadedUploads;

/// 83_000 -> "1:23"
pub(crate) fn fmt_ms(ms: u64) -> String {
    let s = ms / 1000;
    format!("{}:{:02}", s / 60, s % 60)
}

/// Status line after an upload batch was read.
pub(crate) fn upload_summary(loaded: &LoadedUploads) -> String {
    let mut parts = vec![match loaded.files.len() {
        0 => "No WAV files added".to_string(),
        1 => "Added 1 file".to_string(),
        n => format!("Added {n} files"),
    }];

    if loaded.skipped > 0 {
        parts.push(format!("{} skipped (not .wav)", loaded.skipped));
    }
    if !loaded.failed.is_empty() {
        parts.push(format!("{} unreadable", loaded.failed.len()));
    }
    parts.join(", ")
}

/// Seek slider ratio -> ms, clamped just short of the end.
pub(crate) fn seek_target_ms(ratio: f32, duration_ms: u64) -> u64 {
    let target = (ratio.clamp(0.0, 1.0) as f64 * duration_ms as f64).round() as u64;
    // Seeking to *exactly* the end tends to produce EOF weirdness.
    target.min(duration_ms.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::types::UploadedFile;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(fmt_ms(0), "0:00");
        assert_eq!(fmt_ms(83_000), "1:23");
        assert_eq!(fmt_ms(3_605_999), "60:05");
    }

    #[test]
    fn summary_mentions_skips_and_failures() {
        let mut loaded = LoadedUploads::default();
        assert_eq!(upload_summary(&loaded), "No WAV files added");

        loaded.files.push(UploadedFile::new(PathBuf::from("a.wav"), vec![]));
        loaded.skipped = 2;
        assert_eq!(upload_summary(&loaded), "Added 1 file, 2 skipped (not .wav)");

        loaded.files.push(UploadedFile::new(PathBuf::from("b.wav"), vec![]));
        loaded.failed.push((PathBuf::from("c.wav"), "denied".into()));
        assert_eq!(
            upload_summary(&loaded),
            "Added 2 files, 2 skipped (not .wav), 1 unreadable"
        );
    }

    #[test]
    fn seek_target_stays_inside_track() {
        assert_eq!(seek_target_ms(0.5, 10_000), 5_000);
        assert_eq!(seek_target_ms(1.0, 10_000), 9_999);
        assert_eq!(seek_target_ms(-1.0, 10_000), 0);
        assert_eq!(seek_target_ms(0.5, 0), 0);
    }
}
