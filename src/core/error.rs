//! Typed errors for the core pipeline.
//!
//! The GUI turns these into strings at the update boundary.

use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum TagError {
    #[error("ID3 read failed: {0}")]
    Id3(#[from] id3::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("unsupported image type: {0}")]
    UnsupportedImage(String),
}

#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    #[error("ffmpeg not found (set encoder.ffmpeg_path or FFMPEG_PATH)")]
    NotFound,
    #[error("ffmpeg at {path} is not usable: {details}")]
    Unusable { path: PathBuf, details: String },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("ffmpeg exited with status {code:?}: {details}")]
    Failed { code: Option<i32>, details: String },
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("converting {name} failed")]
    Encode {
        name: String,
        #[source]
        source: EncodeError,
    },
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
