//! gui/update/export.rs
//! "Save to Local" (one file) and "Export All" (zip).
//!
//! Both run as streaming tasks: progress messages while converting, then one
//! Finished message. Failures are logged with their cause chain; the banner
//! only gets a short line.

use std::convert::identity;
use std::path::PathBuf;

use iced::Task;
use iced::futures::SinkExt;
use iced::futures::channel::mpsc;

use super::super::state::{Message, Raamp3};
use super::util::{forward_all, report};
use crate::core::export::{BatchEvent, export_batch, export_single};
use crate::core::types::FileId;

pub(crate) fn save_to_local(state: &mut Raamp3, id: FileId) -> Task<Message> {
    if state.save_state(id).is_busy() {
        return Task::none();
    }
    let Some(item) = state.session.export_item(id) else {
        return Task::none();
    };

    state.saves.entry(id).or_default().begin();
    state.status = format!("Converting {}...", item.file.name);

    let encoder = state.encoder.clone();
    let saver = state.saver.clone();

    Task::run(
        iced::stream::channel(16, move |mut output: mpsc::Sender<Message>| async move {
            let mut progress_tx = output.clone();
            let result = export_single(&encoder, &item, &saver, move |pct| {
                // Dropped ticks are fine; the next one catches up.
                let _ = progress_tx.try_send(Message::SaveProgress(id, pct));
            })
            .await
            .map_err(|e| report("Conversion failed", e));

            let _ = output.send(Message::SaveFinished(id, result)).await;
        }),
        identity,
    )
}

pub(crate) fn save_progress(state: &mut Raamp3, id: FileId, pct: u8) -> Task<Message> {
    if let Some(s) = state.saves.get_mut(&id) {
        s.progress(pct);
    }
    Task::none()
}

pub(crate) fn save_finished(
    state: &mut Raamp3,
    id: FileId,
    result: Result<Option<PathBuf>, String>,
) -> Task<Message> {
    state.saves.remove(&id);

    match result {
        Ok(Some(path)) => state.status = format!("Saved {}", path.display()),
        Ok(None) => state.status = "Save cancelled.".to_string(),
        Err(e) => {
            state.status = "Conversion failed.".to_string();
            state.error = Some(e);
        }
    }
    Task::none()
}

pub(crate) fn export_all(state: &mut Raamp3) -> Task<Message> {
    if state.batch.is_busy() || state.session.is_empty() {
        return Task::none();
    }

    let items = state.session.export_items();
    state.batch.begin(items.len());
    state.status = format!("Converting {} files...", items.len());

    let encoder = state.encoder.clone();
    let saver = state.saver.clone();

    Task::run(
        iced::stream::channel(16, move |mut output: mpsc::Sender<Message>| async move {
            // Every event counts here: FileStarted/Packaging drive the progress line.
            let result = forward_all(&mut output, Message::BatchProgress, |events| async move {
                export_batch(&encoder, &items, &saver, move |ev| {
                    let _ = events.unbounded_send(ev);
                })
                .await
            })
            .await
            .map_err(|e| report("Batch export failed", e));

            let _ = output.send(Message::BatchFinished(result)).await;
        }),
        identity,
    )
}

pub(crate) fn batch_progress(state: &mut Raamp3, ev: BatchEvent) -> Task<Message> {
    state.batch.apply(ev);
    Task::none()
}

pub(crate) fn batch_finished(
    state: &mut Raamp3,
    result: Result<Option<PathBuf>, String>,
) -> Task<Message> {
    state.batch.finish();

    match result {
        Ok(Some(path)) => state.status = format!("Saved {}", path.display()),
        Ok(None) => state.status = "Export cancelled.".to_string(),
        Err(e) => {
            state.status = "Batch export failed.".to_string();
            state.error = Some(e);
        }
    }
    Task::none()
}
