//! core/playback/mod.rs
//! Preview playback: one engine thread owns the audio output.
//!
//! - GUI sends `PlayerCommand`s through a `PlaybackController`
//! - Engine answers with `PlayerEvent`s on a plain mpsc channel (polled by the GUI)

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

mod decoder;
mod engine;

pub use engine::PlaybackEngine;

#[derive(Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Best-effort send. If the engine died, the command is dropped.
    pub fn send(&self, cmd: PlayerCommand) {
        if self.command_tx.send(cmd).is_err() {
            tracing::debug!("playback engine gone; command dropped");
        }
    }
}

#[derive(Debug)]
pub enum PlayerCommand {
    PlayFile(PathBuf),
    Pause,
    Resume,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Started {
        path: PathBuf,
        duration_ms: Option<u64>,
        /// Non-zero after a seek.
        start_ms: u64,
    },
    Paused,
    Resumed,
    Stopped,
    Position {
        position_ms: u64,
    },
    TrackEnded,
    Error(String),
}

/// Spawns the playback thread and returns:
/// - PlaybackController (store in GUI state)
/// - Receiver<PlayerEvent> (drained on every GUI tick)
pub fn start_playback(volume: f32) -> (PlaybackController, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    let spawned = thread::Builder::new()
        .name("raamp3-playback".into())
        .spawn(move || {
            let mut engine = match PlaybackEngine::new(event_tx.clone(), volume) {
                Ok(e) => e,
                Err(msg) => {
                    tracing::error!("playback unavailable: {msg}");
                    let _ = event_tx.send(PlayerEvent::Error(msg));
                    return;
                }
            };

            engine.run(command_rx);
            tracing::debug!("playback thread exiting");
        });

    if let Err(e) = spawned {
        tracing::error!("could not spawn playback thread: {e}");
    }

    (PlaybackController { command_tx }, event_rx)
}

#[cfg(test)]
pub(crate) mod testing {
    /// Minimal 16-bit PCM mono WAV: `frames` samples of a quiet ramp.
    pub(crate) fn pcm_wav(sample_rate: u32, frames: u32) -> Vec<u8> {
        let data_len = frames * 2;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for i in 0..frames {
            out.extend_from_slice(&((i % 256) as i16).to_le_bytes());
        }
        out
    }
}
