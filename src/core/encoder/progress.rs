//! Encoder progress: line plumbing + percent tracking.
//!
//! ffmpeg writes `key=value` progress blocks on stdout (`-progress pipe:1`)
//! and its banner (including `Duration: HH:MM:SS.xx`) on stderr.

use std::collections::VecDeque;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const STDERR_TAIL: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderLine {
    Progress(String),
    Log(String),
}

/// Readers attached to one ffmpeg child.
///
/// Scoped to a single conversion: dropping it aborts the reader tasks,
/// whatever path the conversion leaves by.
pub struct ProgressSubscription {
    rx: mpsc::UnboundedReceiver<EncoderLine>,
    readers: Vec<JoinHandle<()>>,
}

impl ProgressSubscription {
    pub fn attach(child: &mut Child) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut readers = Vec::with_capacity(2);

        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_reader(stdout, tx.clone(), EncoderLine::Progress));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_reader(stderr, tx, EncoderLine::Log));
        }

        Self { rx, readers }
    }

    /// Next line from either stream; `None` once both are closed.
    pub async fn next(&mut self) -> Option<EncoderLine> {
        self.rx.recv().await
    }
}

impl Drop for ProgressSubscription {
    fn drop(&mut self) {
        for reader in &self.readers {
            reader.abort();
        }
    }
}

fn spawn_reader<R>(
    stream: R,
    tx: mpsc::UnboundedSender<EncoderLine>,
    wrap: fn(String) -> EncoderLine,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(wrap(line)).is_err() {
                break;
            }
        }
    })
}

/// Turns encoder lines into integer percentages.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    duration_us: Option<u64>,
    last: Option<u8>,
    tail: VecDeque<String>,
}

impl ProgressTracker {
    /// Feed one line; returns a percentage when it changed.
    pub fn feed(&mut self, line: &EncoderLine) -> Option<u8> {
        match line {
            EncoderLine::Log(l) => {
                self.note_log(l);
                None
            }
            EncoderLine::Progress(l) => {
                let pct = self.percent_for(l)?;
                self.emit(pct)
            }
        }
    }

    /// Last few diagnostic lines (for error reports).
    pub fn tail(&self) -> String {
        self.tail.iter().cloned().collect::<Vec<_>>().join(" | ")
    }

    fn note_log(&mut self, line: &str) {
        if self.duration_us.is_none() {
            self.duration_us = parse_duration_line(line);
        }
        let line = line.trim();
        if !line.is_empty() {
            if self.tail.len() == STDERR_TAIL {
                self.tail.pop_front();
            }
            self.tail.push_back(line.to_string());
        }
    }

    fn percent_for(&self, line: &str) -> Option<u8> {
        let (key, value) = line.trim().split_once('=')?;
        match key {
            "progress" if value == "end" => Some(100),
            // `out_time_ms` is microseconds too (long-standing ffmpeg quirk).
            "out_time_us" | "out_time_ms" => {
                let out_us = value.parse::<u64>().ok()?;
                let total = self.duration_us.filter(|d| *d > 0)?;
                let pct = ((out_us as f64 / total as f64) * 100.0).round();
                // 100 is reserved for `progress=end`.
                Some(pct.clamp(0.0, 99.0) as u8)
            }
            _ => None,
        }
    }

    /// Only report changes, and never go backwards.
    fn emit(&mut self, pct: u8) -> Option<u8> {
        match self.last {
            Some(prev) if pct <= prev => None,
            _ => {
                self.last = Some(pct);
                Some(pct)
            }
        }
    }
}

/// Parse `  Duration: 00:03:12.34, start: ...` into microseconds.
fn parse_duration_line(line: &str) -> Option<u64> {
    let rest = line.trim().strip_prefix("Duration:")?;
    let stamp = rest.trim().split(',').next()?.trim();

    let mut parts = stamp.split(':');
    let h = parts.next()?.parse::<u64>().ok()?;
    let m = parts.next()?.parse::<u64>().ok()?;
    let s = parts.next()?.parse::<f64>().ok()?;

    let us = (h * 3600 + m * 60) as f64 * 1_000_000.0 + s * 1_000_000.0;
    Some(us.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(s: &str) -> EncoderLine {
        EncoderLine::Log(s.to_string())
    }

    fn prog(s: &str) -> EncoderLine {
        EncoderLine::Progress(s.to_string())
    }

    #[test]
    fn duration_line() {
        assert_eq!(
            parse_duration_line("  Duration: 00:00:10.00, start: 0.000000, bitrate: 1411 kb/s"),
            Some(10_000_000)
        );
        assert_eq!(
            parse_duration_line("Duration: 01:02:03.50, bitrate: N/A"),
            Some(3_723_500_000)
        );
        assert_eq!(parse_duration_line("Duration: N/A, bitrate: N/A"), None);
        assert_eq!(parse_duration_line("Stream #0:0: Audio: pcm_s16le"), None);
    }

    #[test]
    fn percentages_are_monotonic_and_end_at_100() {
        let mut t = ProgressTracker::default();
        let lines = [
            log("Input #0, wav, from 'input.wav':"),
            log("  Duration: 00:00:10.00, start: 0.000000, bitrate: 1411 kb/s"),
            prog("out_time_us=2500000"),
            prog("progress=continue"),
            prog("out_time_us=2500000"),
            prog("out_time_ms=1000000"),
            prog("out_time_us=5000000"),
            prog("out_time_us=10000000"),
            prog("progress=end"),
        ];

        let seen: Vec<u8> = lines.iter().filter_map(|l| t.feed(l)).collect();
        assert_eq!(seen, vec![25, 50, 99, 100]);
    }

    #[test]
    fn no_percent_without_duration() {
        let mut t = ProgressTracker::default();
        assert_eq!(t.feed(&prog("out_time_us=2500000")), None);
        assert_eq!(t.feed(&prog("progress=end")), Some(100));
    }

    #[test]
    fn tail_keeps_last_lines() {
        let mut t = ProgressTracker::default();
        for i in 0..12 {
            t.feed(&log(&format!("line {i}")));
        }
        let tail = t.tail();
        assert!(tail.starts_with("line 4"));
        assert!(tail.ends_with("line 11"));
    }
}
