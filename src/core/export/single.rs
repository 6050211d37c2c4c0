//! Single-file export: convert one file, save it as `<title>.mp3` (or `output.mp3`).

use std::path::PathBuf;

use tracing::info;

use super::archive::mp3_file_name;
use super::save::Save;
use crate::core::encoder::{EncoderHandle, Transcode};
use crate::core::error::ExportError;
use crate::core::session::ExportItem;

pub const SINGLE_FALLBACK: &str = "output";

pub fn single_file_name(item: &ExportItem) -> String {
    mp3_file_name(&item.metadata.title, SINGLE_FALLBACK)
}

/// Returns the saved path, or `None` if the user cancelled the dialog.
pub async fn export_single<T: Transcode>(
    encoder: &EncoderHandle<T>,
    item: &ExportItem,
    saver: &impl Save,
    progress: impl FnMut(u8) + Send,
) -> Result<Option<PathBuf>, ExportError> {
    let mp3 = encoder
        .convert(&item.file, &item.metadata, progress)
        .await
        .map_err(|source| ExportError::Encode {
            name: item.file.name.clone(),
            source,
        })?;

    let name = single_file_name(item);
    info!("exporting {} as {name} ({})", item.file.name, mp3.mime);
    saver.save(mp3.data, &name).await
}
