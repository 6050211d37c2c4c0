//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use iced::widget::image;

use crate::config::Config;
use crate::core::{LoadedUploads, UploadQueue};
use crate::core::encoder::{EncoderHandle, FfmpegEncoder};
use crate::core::export::{BatchEvent, BatchState, SaveDestination, SaveState};
use crate::core::playback::{PlaybackController, PlayerCommand, PlayerEvent};
use crate::core::session::Session;
use crate::core::types::{FileId, Picture, TagField, TagMetadata};

/// App state
pub(crate) struct Raamp3 {
    pub status: String,
    /// Shown in the banner until dismissed.
    pub error: Option<String>,

    // Uploads + metadata
    pub session: Session,
    pub path_input: String,
    /// Upload batches still being read from disk, applied in request order.
    pub uploads: UploadQueue,
    pub covers: HashMap<FileId, image::Handle>,

    // Export
    pub encoder: EncoderHandle,
    pub saver: SaveDestination,
    pub saves: HashMap<FileId, SaveState>,
    pub batch: BatchState,

    // Playback (engine is created on first use)
    pub playback: Option<PlaybackController>,
    pub playback_events: Option<Receiver<PlayerEvent>>,
    pub now_playing: Option<FileId>,
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    /// Set while the seek slider is being dragged.
    pub seek_preview_ratio: Option<f32>,
    pub volume: f32,
}

impl Raamp3 {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            status: "Drop .wav files or folders to begin.".to_string(),
            error: None,

            session: Session::default(),
            path_input: String::new(),
            uploads: UploadQueue::default(),
            covers: HashMap::new(),

            encoder: EncoderHandle::new(FfmpegEncoder::new(config.encoder.ffmpeg_path.clone())),
            saver: SaveDestination::from_config(config.export.directory.clone()),
            saves: HashMap::new(),
            batch: BatchState::default(),

            playback: None,
            playback_events: None,
            now_playing: None,
            is_playing: false,
            position_ms: 0,
            duration_ms: None,
            seek_preview_ratio: None,
            volume: config.playback.volume,
        }
    }

    pub(crate) fn save_state(&self, id: FileId) -> SaveState {
        self.saves.get(&id).copied().unwrap_or_default()
    }
}

impl Drop for Raamp3 {
    fn drop(&mut self) {
        if let Some(controller) = &self.playback {
            controller.send(PlayerCommand::Shutdown);
        }
    }
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Upload
    PathInputChanged(String),
    AddTypedPath,
    BrowsePressed,
    PathsChosen(Vec<PathBuf>),
    FileDropped(PathBuf),
    UploadsLoaded(u64, LoadedUploads),
    TagsExtracted(FileId, TagMetadata),

    // Editor
    FieldChanged(FileId, TagField, String),
    PickArt(FileId),
    /// `Ok(None)` = picker cancelled.
    ArtPicked(FileId, Result<Option<Picture>, String>),
    ClearArt(FileId),

    // Export
    SaveToLocal(FileId),
    SaveProgress(FileId, u8),
    SaveFinished(FileId, Result<Option<PathBuf>, String>),
    ExportAll,
    BatchProgress(BatchEvent),
    BatchFinished(Result<Option<PathBuf>, String>),
    DismissError,

    // Playback
    TickPlayback,
    PlayPause(FileId),
    Stop,
    SeekTo(f32),
    SeekCommit,
    SetVolume(f32),
}
