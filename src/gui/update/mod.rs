//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{Message, Raamp3};

mod editor;
mod export;
mod playback;
mod upload;
mod util;

pub(crate) fn update(state: &mut Raamp3, message: Message) -> Task<Message> {
    match message {
        // Upload
        Message::PathInputChanged(s) => upload::path_input_changed(state, s),
        Message::AddTypedPath => upload::add_typed_path(state),
        Message::BrowsePressed => upload::browse(state),
        Message::PathsChosen(paths) => upload::load_paths(state, paths),
        Message::FileDropped(path) => upload::load_paths(state, vec![path]),
        Message::UploadsLoaded(seq, loaded) => upload::uploads_loaded(state, seq, loaded),
        Message::TagsExtracted(id, meta) => upload::tags_extracted(state, id, meta),

        // Editor
        Message::FieldChanged(id, field, value) => editor::field_changed(state, id, field, value),
        Message::PickArt(id) => editor::pick_art(state, id),
        Message::ArtPicked(id, result) => editor::art_picked(state, id, result),
        Message::ClearArt(id) => editor::clear_art(state, id),

        // Export
        Message::SaveToLocal(id) => export::save_to_local(state, id),
        Message::SaveProgress(id, pct) => export::save_progress(state, id, pct),
        Message::SaveFinished(id, result) => export::save_finished(state, id, result),
        Message::ExportAll => export::export_all(state),
        Message::BatchProgress(ev) => export::batch_progress(state, ev),
        Message::BatchFinished(result) => export::batch_finished(state, result),
        Message::DismissError => {
            state.error = None;
            Task::none()
        }

        // Playback
        Message::TickPlayback => playback::drain_events(state),
        Message::PlayPause(id) => playback::play_pause(state, id),
        Message::Stop => playback::stop(state),
        Message::SeekTo(ratio) => playback::seek_preview(state, ratio),
        Message::SeekCommit => playback::seek_commit(state),
        Message::SetVolume(vol) => playback::set_volume(state, vol),
    }
}
