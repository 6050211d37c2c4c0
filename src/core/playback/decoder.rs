//! core/playback/decoder.rs
//! WAV -> rodio::Source via Symphonia, opened at an arbitrary offset.
//!
//! Seeking = reopen at the target ms (rodio's own seek is unreliable for
//! custom sources).

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use rodio::Source;
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

/// Open `path` and position it at `start_ms`.
/// Returns the source plus the full track duration (if the container knows it).
pub fn open_at_ms(path: &Path, start_ms: u64) -> Result<(PreviewSource, Option<u64>), String> {
    let file = File::open(path).map_err(|e| format!("Open failed: {e}"))?;
    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| format!("Not a playable WAV: {e}"))?;

    let mut format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| "No audio track found.".to_string())?;

    let track_id = track.id;
    let params = track.codec_params.clone();
    let duration_ms = duration_ms(params.time_base, params.n_frames);

    if start_ms > 0 {
        let seek_to = SeekTo::Time {
            time: Time::from(Duration::from_millis(start_ms)),
            track_id: Some(track_id),
        };
        format
            .seek(SeekMode::Accurate, seek_to)
            .map_err(|e| format!("Seek failed: {e}"))?;
    }

    // Built after any seek so it starts from clean state.
    let decoder = symphonia::default::get_codecs()
        .make(&params, &DecoderOptions::default())
        .map_err(|e| format!("Decoder init failed: {e}"))?;

    let mut src = PreviewSource {
        format,
        decoder,
        track_id,
        sample_rate: params.sample_rate.unwrap_or(44_100),
        channels: params.channels.map(|c| c.count() as u16).unwrap_or(2),
        buf: Vec::new(),
        pos: 0,
        ended: false,
    };
    src.refill();

    Ok((src, duration_ms))
}

fn duration_ms(time_base: Option<TimeBase>, n_frames: Option<u64>) -> Option<u64> {
    let t = time_base?.calc_time(n_frames?);
    Some((t.seconds as f64 * 1000.0 + t.frac * 1000.0).round() as u64)
}

/// Streaming interleaved f32 samples.
pub struct PreviewSource {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    sample_rate: u32,
    channels: u16,
    buf: Vec<f32>,
    pos: usize,
    ended: bool,
}

impl PreviewSource {
    /// Decode the next packet into `buf`. Sets `ended` at EOF or on a hard error.
    fn refill(&mut self) {
        self.buf.clear();
        self.pos = 0;

        while !self.ended {
            let packet = match self.format.next_packet() {
                Ok(p) => p,
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(SymphoniaError::IoError(_)) => {
                    self.ended = true;
                    return;
                }
                Err(e) => {
                    tracing::warn!("preview read error: {e}");
                    self.ended = true;
                    return;
                }
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(decoded) => {
                    Self::push_interleaved(
                        &mut self.sample_rate,
                        &mut self.channels,
                        &mut self.buf,
                        decoded,
                    );
                    if !self.buf.is_empty() {
                        return;
                    }
                }
                // Corrupt packet; skip.
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(SymphoniaError::ResetRequired) => self.decoder.reset(),
                Err(e) => {
                    tracing::warn!("preview decode error: {e}");
                    self.ended = true;
                }
            }
        }
    }

    fn push_interleaved(
        sample_rate: &mut u32,
        channels: &mut u16,
        buf: &mut Vec<f32>,
        decoded: AudioBufferRef<'_>,
    ) {
        let signal = *decoded.spec();
        *sample_rate = signal.rate;
        *channels = signal.channels.count() as u16;

        let mut samples = SampleBuffer::<f32>::new(decoded.capacity() as u64, signal);
        samples.copy_interleaved_ref(decoded);
        buf.extend_from_slice(samples.samples());
    }
}

impl Iterator for PreviewSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.pos >= self.buf.len() {
            if self.ended {
                return None;
            }
            self.refill();
        }

        let s = self.buf.get(self.pos).copied();
        self.pos += 1;
        s
    }
}

impl Source for PreviewSource {
    // rodio 0.21 uses current_span_len (not current_frame_len).
    fn current_span_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::playback::testing::pcm_wav;

    fn write_wav(frames: u32) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, pcm_wav(8_000, frames)).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_duration_and_every_sample() {
        let (_dir, path) = write_wav(8_000);
        let (src, duration) = open_at_ms(&path, 0).unwrap();

        assert_eq!(duration, Some(1_000));
        assert_eq!(src.channels(), 1);
        assert_eq!(src.sample_rate(), 8_000);
        assert_eq!(src.count(), 8_000);
    }

    #[test]
    fn opening_at_offset_skips_ahead() {
        let (_dir, path) = write_wav(8_000);
        let (src, _) = open_at_ms(&path, 500).unwrap();

        let left = src.count();
        assert!(left > 0 && left < 8_000, "left = {left}");
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.wav");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert!(open_at_ms(&path, 0).is_err());
    }
}
