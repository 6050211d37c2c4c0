//! Batch export: convert every file in order, zip, save once.
//!
//! - strictly sequential: file k+1 starts only after file k finished
//! - any failure aborts the batch; nothing is saved
//! - entry names: `<title>.mp3`, or `track-<N>.mp3` (N = 1-based position)

use std::path::PathBuf;

use tracing::{debug, info};

use super::archive::{ARCHIVE_NAME, Archive, mp3_file_name};
use super::save::Save;
use crate::core::encoder::{EncoderHandle, Transcode};
use crate::core::error::ExportError;
use crate::core::session::ExportItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEvent {
    /// `index` is 1-based.
    FileStarted { index: usize, total: usize },
    /// Percent for the file currently converting.
    Progress(u8),
    /// All files converted; the archive is being written.
    Packaging,
}

pub fn batch_entry_name(item: &ExportItem, position: usize) -> String {
    mp3_file_name(&item.metadata.title, &format!("track-{position}"))
}

/// Returns the saved archive path, or `None` if the user cancelled the dialog.
pub async fn export_batch<T: Transcode>(
    encoder: &EncoderHandle<T>,
    items: &[ExportItem],
    saver: &impl Save,
    mut on_event: impl FnMut(BatchEvent) + Send,
) -> Result<Option<PathBuf>, ExportError> {
    if items.is_empty() {
        return Err(ExportError::Empty);
    }

    let total = items.len();
    info!("batch export of {total} files");

    let mut archive = Archive::new();
    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        on_event(BatchEvent::FileStarted { index, total });

        let mp3 = encoder
            .convert(&item.file, &item.metadata, |p| on_event(BatchEvent::Progress(p)))
            .await
            .map_err(|source| ExportError::Encode {
                name: item.file.name.clone(),
                source,
            })?;

        let entry = archive.add(&batch_entry_name(item, index), &mp3.data)?;
        debug!("{index}/{total}: {} -> {entry}", item.file.name);
    }

    on_event(BatchEvent::Packaging);
    info!("packaging {} entries into {ARCHIVE_NAME}", archive.len());
    let zip = archive.finish()?;
    saver.save(zip, ARCHIVE_NAME).await
}
