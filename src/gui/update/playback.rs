//! gui/update/playback.rs
//! GUI-playback engine bridge
//!
//! - One preview at a time; `now_playing` is the `FileId` whose card owns the transport.
//! - GUI never touches rodio/symphonia directly.
//! - All IO / timing is driven by the engine + TickPlayback polling.

use iced::Task;

use super::super::state::{Message, Raamp3};
use super::super::util::seek_target_ms;
use crate::core::playback::{PlayerCommand, PlayerEvent, start_playback};
use crate::core::types::FileId;

fn ensure_engine(state: &mut Raamp3) {
    if state.playback.is_some() && state.playback_events.is_some() {
        return;
    }

    let (controller, events) = start_playback(state.volume);
    state.playback = Some(controller);
    state.playback_events = Some(events);
}

pub(crate) fn drain_events(state: &mut Raamp3) -> Task<Message> {
    let Some(rx) = state.playback_events.as_ref() else {
        return Task::none();
    };

    let drained: Vec<PlayerEvent> = rx.try_iter().collect();
    for ev in drained {
        handle_event(state, ev);
    }

    Task::none()
}

/// The card button: play this file, or pause/resume it if it is the current one.
pub(crate) fn play_pause(state: &mut Raamp3, id: FileId) -> Task<Message> {
    if state.now_playing == Some(id) {
        let cmd = if state.is_playing {
            PlayerCommand::Pause
        } else {
            PlayerCommand::Resume
        };
        state.is_playing = !state.is_playing;
        send(state, cmd);
        return Task::none();
    }

    let Some(path) = state.session.file(id).map(|f| f.path.clone()) else {
        return Task::none();
    };

    tracing::debug!("preview {}", path.display());
    send(state, PlayerCommand::PlayFile(path));

    state.now_playing = Some(id);
    state.is_playing = true;
    state.position_ms = 0;
    state.duration_ms = None;
    state.seek_preview_ratio = None;

    Task::none()
}

pub(crate) fn stop(state: &mut Raamp3) -> Task<Message> {
    send(state, PlayerCommand::Stop);
    reset_transport(state);
    state.now_playing = None;
    Task::none()
}

/// Seek slider changed: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut Raamp3, ratio: f32) -> Task<Message> {
    let Some(dur_ms) = state.duration_ms else {
        return Task::none();
    };

    let ratio = ratio.clamp(0.0, 1.0);
    state.seek_preview_ratio = Some(ratio);
    state.position_ms = seek_target_ms(ratio, dur_ms);

    Task::none()
}

/// Seek slider released: commit the last preview to the engine.
pub(crate) fn seek_commit(state: &mut Raamp3) -> Task<Message> {
    let Some(ratio) = state.seek_preview_ratio.take() else {
        return Task::none();
    };
    let Some(dur_ms) = state.duration_ms else {
        return Task::none();
    };

    let target_ms = seek_target_ms(ratio, dur_ms);
    send(state, PlayerCommand::Seek(target_ms));

    // Optimistic; the engine confirms via Started/Position.
    state.position_ms = target_ms;
    Task::none()
}

pub(crate) fn set_volume(state: &mut Raamp3, volume: f32) -> Task<Message> {
    state.volume = volume.clamp(0.0, 1.0);

    if let Some(controller) = &state.playback {
        controller.send(PlayerCommand::SetVolume(state.volume));
    }
    Task::none()
}

fn send(state: &mut Raamp3, cmd: PlayerCommand) {
    ensure_engine(state);
    if let Some(controller) = &state.playback {
        controller.send(cmd);
    }
}

fn reset_transport(state: &mut Raamp3) {
    state.is_playing = false;
    state.position_ms = 0;
    state.duration_ms = None;
    state.seek_preview_ratio = None;
}

fn handle_event(state: &mut Raamp3, event: PlayerEvent) {
    match event {
        PlayerEvent::Started {
            path,
            duration_ms,
            start_ms,
        } => {
            tracing::debug!("playing {} from {start_ms} ms", path.display());
            state.is_playing = true;
            state.duration_ms = duration_ms;
            state.position_ms = start_ms;
            state.seek_preview_ratio = None;
        }
        PlayerEvent::Paused => state.is_playing = false,
        PlayerEvent::Resumed => state.is_playing = true,
        PlayerEvent::Stopped => reset_transport(state),
        PlayerEvent::Position { position_ms } => {
            // If user is dragging the seek slider, don't fight them.
            if state.seek_preview_ratio.is_none() {
                state.position_ms = position_ms;
            }
        }
        PlayerEvent::TrackEnded => {
            state.is_playing = false;
            state.position_ms = 0;
            state.seek_preview_ratio = None;
        }
        PlayerEvent::Error(err) => {
            state.is_playing = false;
            state.status = format!("Playback error: {err}");
        }
    }
}
