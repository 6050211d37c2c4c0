//! core/playback/engine.rs
//! Playback engine (rodio owner).
//!
//! Owns:
//! - OutputStream (must stay alive)
//! - Sink (per current file)
//! - command loop + periodic position ticks
//!
//! Emits PlayerEvent back via a channel.
//! No Iced imports.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use super::decoder;
use super::{PlayerCommand, PlayerEvent};

const TICK_MS: u64 = 200;

pub struct PlaybackEngine {
    // Keep this alive for the lifetime of the engine!
    stream: OutputStream,

    sink: Option<Sink>,
    current_path: Option<PathBuf>,
    /// Where the current sink started, in file time. `sink.get_pos()` counts from here.
    base_ms: u64,
    volume: f32,

    event_tx: Sender<PlayerEvent>,
}

impl PlaybackEngine {
    pub fn new(event_tx: Sender<PlayerEvent>, volume: f32) -> Result<Self, String> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| format!("No audio output: {e}"))?;

        Ok(Self {
            stream,
            sink: None,
            current_path: None,
            base_ms: 0,
            volume: volume.clamp(0.0, 1.0),
            event_tx,
        })
    }

    pub fn run(&mut self, command_rx: Receiver<PlayerCommand>) {
        let tick = Duration::from_millis(TICK_MS);

        loop {
            match command_rx.recv_timeout(tick) {
                Ok(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                    while let Ok(cmd) = command_rx.try_recv() {
                        if self.handle_command(cmd) {
                            self.stop_internal();
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            self.tick();
        }

        self.stop_internal();
    }

    fn emit(&self, event: PlayerEvent) {
        // GUI gone = nothing left to tell.
        let _ = self.event_tx.send(event);
    }

    /// Returns true on Shutdown.
    fn handle_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::PlayFile(path) => {
                if let Err(e) = self.open(path, 0) {
                    self.emit(PlayerEvent::Error(e));
                }
            }
            PlayerCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                    self.emit(PlayerEvent::Paused);
                }
            }
            PlayerCommand::Resume => {
                if let Some(sink) = &self.sink {
                    sink.play();
                    self.emit(PlayerEvent::Resumed);
                }
            }
            PlayerCommand::Stop => {
                self.stop_internal();
                self.emit(PlayerEvent::Stopped);
            }
            PlayerCommand::Seek(ms) => self.seek(ms),
            PlayerCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
                if let Some(sink) = &self.sink {
                    sink.set_volume(self.volume);
                }
            }
            PlayerCommand::Shutdown => return true,
        }

        false
    }

    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };

        if sink.empty() {
            self.stop_internal();
            self.emit(PlayerEvent::TrackEnded);
            return;
        }

        let position_ms = self.base_ms + sink.get_pos().as_millis() as u64;
        self.emit(PlayerEvent::Position { position_ms });
    }

    /// Reopen the current file at `ms`, keeping the paused/playing state.
    fn seek(&mut self, ms: u64) {
        let Some(path) = self.current_path.clone() else {
            return;
        };
        let was_paused = self.sink.as_ref().is_some_and(Sink::is_paused);

        match self.open(path, ms) {
            Ok(()) if was_paused => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
            }
            Ok(()) => {}
            Err(e) => self.emit(PlayerEvent::Error(e)),
        }
    }

    fn open(&mut self, path: PathBuf, start_ms: u64) -> Result<(), String> {
        self.stop_internal();

        let (source, duration_ms) = decoder::open_at_ms(&path, start_ms)?;
        debug!(
            "preview {} from {start_ms} ms (duration {duration_ms:?})",
            path.display()
        );

        // rodio 0.21.x: Sink is created from the stream's mixer
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.play();

        self.sink = Some(sink);
        self.current_path = Some(path.clone());
        self.base_ms = start_ms;

        self.emit(PlayerEvent::Started {
            path,
            duration_ms,
            start_ms,
        });
        Ok(())
    }

    fn stop_internal(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        if self.current_path.take().is_some() {
            self.base_ms = 0;
        }
    }
}
