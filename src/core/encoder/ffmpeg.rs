//! ffmpeg-backed `Transcode`.
//!
//! Per call:
//! - fresh temp dir as working storage (input.wav, cover.<ext>, output.mp3)
//! - spawn ffmpeg, stream progress lines, wait
//! - read output.mp3 back; temp dir is removed when it drops

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, info, trace};

use super::args::build_args;
use super::locate::find_ffmpeg;
use super::progress::{EncoderLine, ProgressSubscription, ProgressTracker};
use super::{EncodeRequest, Transcode};
use crate::core::error::EncodeError;

const INPUT_NAME: &str = "input.wav";
const OUTPUT_NAME: &str = "output.mp3";

pub struct FfmpegEncoder {
    configured: Option<PathBuf>,
    /// Located + validated on first use, then reused for the process lifetime.
    binary: OnceCell<PathBuf>,
}

impl FfmpegEncoder {
    pub fn new(configured: Option<PathBuf>) -> Self {
        Self {
            configured,
            binary: OnceCell::new(),
        }
    }

    async fn runtime(&self) -> Result<&Path, EncodeError> {
        let bin = self
            .binary
            .get_or_try_init(|| async {
                let bin = find_ffmpeg(self.configured.as_deref()).ok_or(EncodeError::NotFound)?;
                validate(&bin).await?;
                info!("using encoder {}", bin.display());
                Ok::<_, EncodeError>(bin)
            })
            .await?;
        Ok(bin.as_path())
    }
}

async fn validate(bin: &Path) -> Result<(), EncodeError> {
    let output = Command::new(bin)
        .arg("-version")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| EncodeError::Unusable {
            path: bin.to_path_buf(),
            details: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(EncodeError::Unusable {
            path: bin.to_path_buf(),
            details: format!("-version exited with {:?}", output.status.code()),
        });
    }

    if let Some(first) = String::from_utf8_lossy(&output.stdout).lines().next() {
        debug!("{first}");
    }
    Ok(())
}

/// `cover.jpg`, `cover.png`, ... from the picture MIME type.
fn cover_file_name(mime: &str) -> String {
    let ext = match mime {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/bmp" => "bmp",
        "image/webp" => "webp",
        _ => "jpg",
    };
    format!("cover.{ext}")
}

impl Transcode for FfmpegEncoder {
    async fn transcode(
        &self,
        request: EncodeRequest<'_>,
        progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<Vec<u8>, EncodeError> {
        let bin = self.runtime().await?;

        let workdir = tempfile::Builder::new().prefix("raamp3-").tempdir()?;
        let input = workdir.path().join(INPUT_NAME);
        let output = workdir.path().join(OUTPUT_NAME);
        tokio::fs::write(&input, request.audio).await?;

        let cover = match &request.metadata.picture {
            Some(p) => {
                let path = workdir.path().join(cover_file_name(&p.mime));
                tokio::fs::write(&path, &p.data).await?;
                Some(path)
            }
            None => None,
        };

        let args = build_args(&input, cover.as_deref(), &output, request.metadata);
        trace!("ffmpeg {args:?}");

        let mut child = Command::new(bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut tracker = ProgressTracker::default();
        {
            let mut subscription = ProgressSubscription::attach(&mut child);
            while let Some(line) = subscription.next().await {
                if let EncoderLine::Log(l) = &line {
                    trace!("ffmpeg: {l}");
                }
                if let Some(pct) = tracker.feed(&line) {
                    progress(pct);
                }
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(EncodeError::Failed {
                code: status.code(),
                details: tracker.tail(),
            });
        }

        let data = tokio::fs::read(&output).await?;
        debug!("encoded {} bytes -> {} bytes", request.audio.len(), data.len());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_names_follow_mime() {
        assert_eq!(cover_file_name("image/png"), "cover.png");
        assert_eq!(cover_file_name("image/jpeg"), "cover.jpg");
        assert_eq!(cover_file_name("application/octet-stream"), "cover.jpg");
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let encoder = FfmpegEncoder::new(Some(PathBuf::from("/definitely/not/ffmpeg")));
        // Only meaningful when nothing else on this machine provides ffmpeg.
        if find_ffmpeg(None).is_none() {
            let err = encoder.runtime().await.unwrap_err();
            assert!(matches!(err, EncodeError::NotFound));
        }
    }
}
