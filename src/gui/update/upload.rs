//! gui/update/upload.rs
//! Upload lifecycle: paths in (drop / browse / typed) -> files in the session
//! -> one background tag extraction per file.

use std::path::PathBuf;

use iced::Task;

use super::super::state::{Message, Raamp3};
use super::super::util::upload_summary;
use super::util::spawn_blocking;
use crate::core::types::{FileId, TagMetadata};
use crate::core::{self, LoadedUploads};

pub(crate) fn path_input_changed(state: &mut Raamp3, s: String) -> Task<Message> {
    state.path_input = s;
    Task::none()
}

pub(crate) fn add_typed_path(state: &mut Raamp3) -> Task<Message> {
    let input = state.path_input.trim();
    if input.is_empty() {
        return Task::none();
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        state.status = format!("Not found: {}", path.display());
        return Task::none();
    }

    state.path_input.clear();
    load_paths(state, vec![path])
}

pub(crate) fn browse(_state: &mut Raamp3) -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .add_filter("WAV audio", &["wav", "WAV"])
                .pick_files()
                .await
                .map(|handles| {
                    handles
                        .iter()
                        .map(|h| h.path().to_path_buf())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        },
        Message::PathsChosen,
    )
}

pub(crate) fn load_paths(state: &mut Raamp3, paths: Vec<PathBuf>) -> Task<Message> {
    if paths.is_empty() {
        return Task::none();
    }

    let seq = state.uploads.issue();
    state.status = "Reading files...".to_string();

    Task::perform(
        async move {
            spawn_blocking(move || core::load_uploads(&paths))
                .await
                .unwrap_or_default()
        },
        move |loaded| Message::UploadsLoaded(seq, loaded),
    )
}

/// Batch `seq` finished reading. Earlier batches still in flight hold it back.
pub(crate) fn uploads_loaded(
    state: &mut Raamp3,
    seq: u64,
    loaded: LoadedUploads,
) -> Task<Message> {
    let ready = state.uploads.complete(seq, loaded);
    if ready.is_empty() {
        tracing::debug!("upload batch {seq} waiting on earlier batches");
        return Task::none();
    }

    let tasks: Vec<_> = ready
        .into_iter()
        .map(|loaded| apply_uploads(state, loaded))
        .collect();
    Task::batch(tasks)
}

fn apply_uploads(state: &mut Raamp3, loaded: LoadedUploads) -> Task<Message> {
    state.status = upload_summary(&loaded);

    for (path, reason) in &loaded.failed {
        tracing::warn!("skipped {}: {reason}", path.display());
    }

    let extractions: Vec<Task<Message>> = loaded
        .files
        .iter()
        .map(|file| {
            let id = file.id;
            let content = file.content.clone();
            Task::perform(
                async move {
                    spawn_blocking(move || core::tags::extract_or_default(&content))
                        .await
                        .unwrap_or_default()
                },
                move |meta| Message::TagsExtracted(id, meta),
            )
        })
        .collect();

    let added = state.session.add_files(loaded.files);
    tracing::info!("{} files added ({} total)", added.len(), state.session.len());

    Task::batch(extractions)
}

pub(crate) fn tags_extracted(state: &mut Raamp3, id: FileId, meta: TagMetadata) -> Task<Message> {
    if state.session.resolve_extraction(id, meta) {
        refresh_cover(state, id);
    }
    Task::none()
}

/// Rebuild the cached image handle for `id` from its current picture.
pub(crate) fn refresh_cover(state: &mut Raamp3, id: FileId) {
    let picture = state
        .session
        .metadata(id)
        .and_then(|m| m.picture.as_ref());

    match picture {
        Some(p) => {
            state
                .covers
                .insert(id, iced::widget::image::Handle::from_bytes(p.data.clone()));
        }
        None => {
            state.covers.remove(&id);
        }
    }
}
