//! ffmpeg argument list for one WAV -> MP3 conversion.
//!
//! Pure function: paths in, argv out. Kept separate so the stream-mapping
//! rules are testable without spawning anything.

use std::ffi::OsString;
use std::path::Path;

use crate::core::types::TagMetadata;

pub const BITRATE: &str = "320k";
pub const AUDIO_CODEC: &str = "libmp3lame";

/// Stream-level labels for the attached cover.
pub const COVER_TITLE: &str = "title=Album cover";
pub const COVER_COMMENT: &str = "comment=Cover (front)";

pub fn build_args(
    input: &Path,
    cover: Option<&Path>,
    output: &Path,
    metadata: &TagMetadata,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-hide_banner".into(),
        "-nostdin".into(),
        "-y".into(),
        "-progress".into(),
        "pipe:1".into(),
        "-nostats".into(),
        "-i".into(),
        path_arg(input),
    ];

    if let Some(cover) = cover {
        args.extend(["-i".into(), path_arg(cover)]);
    }

    args.extend(["-map".into(), "0:a".into()]);

    if cover.is_some() {
        args.extend([
            "-map".into(),
            "1:0".into(),
            "-c:v".into(),
            "copy".into(),
            "-disposition:v".into(),
            "attached_pic".into(),
            "-metadata:s:v".into(),
            COVER_TITLE.into(),
            "-metadata:s:v".into(),
            COVER_COMMENT.into(),
        ]);
    }

    args.extend(["-c:a".into(), AUDIO_CODEC.into()]);

    // All seven, even when empty.
    for (key, value) in metadata_pairs(metadata) {
        args.push("-metadata".into());
        args.push(format!("{key}={value}").into());
    }

    args.extend([
        "-id3v2_version".into(),
        "3".into(),
        "-b:a".into(),
        BITRATE.into(),
        "-f".into(),
        "mp3".into(),
        path_arg(output),
    ]);

    args
}

/// ffmpeg metadata keys in write order. Year goes out as `date`.
pub fn metadata_pairs(m: &TagMetadata) -> [(&'static str, &str); 7] {
    [
        ("title", m.title.as_str()),
        ("artist", m.artist.as_str()),
        ("album", m.album.as_str()),
        ("date", m.year.as_str()),
        ("genre", m.genre.as_str()),
        ("track", m.track.as_str()),
        ("composer", m.composer.as_str()),
    ]
}

/// Paths go through untouched: the temp dir may not be UTF-8.
fn path_arg(p: &Path) -> OsString {
    p.as_os_str().to_owned()
}
