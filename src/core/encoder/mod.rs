//! core/encoder/mod.rs
//!
//! Conversion adapter: WAV bytes + `TagMetadata` -> MP3 bytes.
//!
//! - [`Transcode`] is the seam (ffmpeg in the app, fakes in tests)
//! - [`EncoderHandle`] is the one shared encoder: cloned into every export,
//!   it lets exactly one conversion run at a time, whoever asks

mod args;
mod ffmpeg;
mod locate;
mod progress;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

pub use ffmpeg::FfmpegEncoder;

use super::error::EncodeError;
use super::types::{TagMetadata, UploadedFile};

pub const MP3_MIME: &str = "audio/mpeg";

/// Input for one conversion.
#[derive(Debug, Clone, Copy)]
pub struct EncodeRequest<'a> {
    pub audio: &'a [u8],
    pub metadata: &'a TagMetadata,
}

/// Encoded output + its media type.
#[derive(Debug, Clone)]
pub struct Mp3 {
    pub data: Vec<u8>,
    pub mime: &'static str,
}

pub trait Transcode: Send + Sync + 'static {
    /// Encode one payload. `progress` gets integer percentages (0..=100).
    fn transcode(
        &self,
        request: EncodeRequest<'_>,
        progress: &mut (dyn FnMut(u8) + Send),
    ) -> impl Future<Output = Result<Vec<u8>, EncodeError>> + Send;
}

/// Owned, cloneable handle to the shared encoder.
pub struct EncoderHandle<T = FfmpegEncoder> {
    inner: Arc<Shared<T>>,
}

struct Shared<T> {
    encoder: T,
    /// Held for the whole conversion: serializes single + batch exports.
    gate: Mutex<()>,
}

impl<T> Clone for EncoderHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transcode> EncoderHandle<T> {
    pub fn new(encoder: T) -> Self {
        Self {
            inner: Arc::new(Shared {
                encoder,
                gate: Mutex::new(()),
            }),
        }
    }

    pub async fn convert(
        &self,
        file: &UploadedFile,
        metadata: &TagMetadata,
        mut progress: impl FnMut(u8) + Send,
    ) -> Result<Mp3, EncodeError> {
        let _turn = self.inner.gate.lock().await;
        tracing::debug!("converting {} ({})", file.name, file.id);

        let request = EncodeRequest {
            audio: &file.content,
            metadata,
        };
        let data = self.inner.encoder.transcode(request, &mut progress).await?;

        Ok(Mp3 {
            data,
            mime: MP3_MIME,
        })
    }

    #[cfg(test)]
    pub(crate) fn encoder(&self) -> &T {
        &self.inner.encoder
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fake encoder shared by export tests.

    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Echoes `title` back as the "MP3", records calls, optionally fails
    /// on the n-th call (1-based).
    #[derive(Default)]
    pub(crate) struct FakeEncoder {
        pub fail_on: Option<usize>,
        pub calls: AtomicUsize,
        pub in_flight: AtomicUsize,
        pub max_in_flight: AtomicUsize,
        pub seen_titles: StdMutex<Vec<String>>,
    }

    impl FakeEncoder {
        pub(crate) fn failing_on(n: usize) -> Self {
            Self {
                fail_on: Some(n),
                ..Default::default()
            }
        }
    }

    impl Transcode for FakeEncoder {
        async fn transcode(
            &self,
            request: EncodeRequest<'_>,
            progress: &mut (dyn FnMut(u8) + Send),
        ) -> Result<Vec<u8>, EncodeError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            self.seen_titles
                .lock()
                .unwrap()
                .push(request.metadata.title.clone());

            progress(50);
            tokio::time::sleep(Duration::from_millis(5)).await;
            progress(100);

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on == Some(n) {
                return Err(EncodeError::Failed {
                    code: Some(1),
                    details: format!("fake failure on call {n}"),
                });
            }
            Ok(request.metadata.title.as_bytes().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::Ordering;

    use super::testing::FakeEncoder;
    use super::*;

    fn wav() -> UploadedFile {
        UploadedFile::new(PathBuf::from("x.wav"), b"RIFF".to_vec())
    }

    #[tokio::test]
    async fn output_is_tagged_mp3() {
        let handle = EncoderHandle::new(FakeEncoder::default());
        let meta = TagMetadata {
            title: "t".into(),
            ..Default::default()
        };

        let mut seen = Vec::new();
        let mp3 = handle.convert(&wav(), &meta, |p| seen.push(p)).await.unwrap();

        assert_eq!(mp3.mime, "audio/mpeg");
        assert_eq!(mp3.data, b"t");
        assert_eq!(seen, vec![50, 100]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn clones_never_convert_concurrently() {
        let handle = EncoderHandle::new(FakeEncoder::default());
        let file = wav();
        let meta = TagMetadata::default();

        let mut tasks = Vec::new();
        for _ in 0..6 {
            let h = handle.clone();
            let f = file.clone();
            let m = meta.clone();
            tasks.push(tokio::spawn(async move {
                h.convert(&f, &m, |_| {}).await.map(|_| ())
            }));
        }
        for t in tasks {
            t.await.unwrap().unwrap();
        }

        let fake = &handle.inner.encoder;
        assert_eq!(fake.calls.load(Ordering::SeqCst), 6);
        assert_eq!(fake.max_in_flight.load(Ordering::SeqCst), 1);
    }
}
