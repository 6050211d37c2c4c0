//! gui/update/editor.rs
//! Per-file form edits + album art.

use iced::Task;

use super::super::state::{Message, Raamp3};
use super::upload::refresh_cover;
use super::util::spawn_blocking;
use crate::core::tags::{IMAGE_EXTENSIONS, load_picture};
use crate::core::types::{FileId, Picture, TagField};

pub(crate) fn field_changed(
    state: &mut Raamp3,
    id: FileId,
    field: TagField,
    value: String,
) -> Task<Message> {
    state.session.edit_field(id, field, value);
    Task::none()
}

pub(crate) fn pick_art(_state: &mut Raamp3, id: FileId) -> Task<Message> {
    Task::perform(
        async move {
            let Some(handle) = rfd::AsyncFileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
            else {
                return Ok(None);
            };

            let path = handle.path().to_path_buf();
            match spawn_blocking(move || load_picture(&path)).await {
                Some(Ok(picture)) => Ok(Some(picture)),
                Some(Err(e)) => Err(e.to_string()),
                None => Err("image reader stopped".to_string()),
            }
        },
        move |result| Message::ArtPicked(id, result),
    )
}

pub(crate) fn art_picked(
    state: &mut Raamp3,
    id: FileId,
    result: Result<Option<Picture>, String>,
) -> Task<Message> {
    match result {
        Ok(Some(picture)) => {
            tracing::debug!("art for {id}: {picture:?}");
            state.session.set_picture(id, Some(picture));
            refresh_cover(state, id);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("album art rejected: {e}");
            state.error = Some(format!("Could not use that image: {e}"));
        }
    }
    Task::none()
}

pub(crate) fn clear_art(state: &mut Raamp3, id: FileId) -> Task<Message> {
    state.session.set_picture(id, None);
    refresh_cover(state, id);
    Task::none()
}
