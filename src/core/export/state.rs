//! Export state machines shown by the UI.
//!
//! Single file: Idle -> Saving(pct) -> Idle
//! Batch:       Idle -> Converting(i/N, pct) -> Idle

use super::batch::BatchEvent;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    #[default]
    Idle,
    Saving { progress: u8 },
}

impl SaveState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SaveState::Saving { .. })
    }

    pub fn begin(&mut self) {
        *self = SaveState::Saving { progress: 0 };
    }

    pub fn progress(&mut self, pct: u8) {
        if let SaveState::Saving { progress } = self {
            *progress = pct.min(100);
        }
    }

    pub fn finish(&mut self) {
        *self = SaveState::Idle;
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    #[default]
    Idle,
    Converting {
        /// 1-based index of the file being converted (0 before the first starts).
        current: usize,
        total: usize,
        progress: u8,
    },
}

impl BatchState {
    pub fn is_busy(&self) -> bool {
        matches!(self, BatchState::Converting { .. })
    }

    pub fn begin(&mut self, total: usize) {
        *self = BatchState::Converting {
            current: 0,
            total,
            progress: 0,
        };
    }

    pub fn apply(&mut self, event: BatchEvent) {
        let BatchState::Converting {
            current,
            total,
            progress,
        } = self
        else {
            return;
        };

        match event {
            BatchEvent::FileStarted { index, total: n } => {
                *current = index;
                *total = n;
                *progress = 0;
            }
            BatchEvent::Progress(p) => *progress = p.min(100),
            BatchEvent::Packaging => *progress = 100,
        }
    }

    pub fn finish(&mut self) {
        *self = BatchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_state_cycle() {
        let mut s = SaveState::default();
        s.progress(40);
        assert_eq!(s, SaveState::Idle);

        s.begin();
        assert!(s.is_busy());
        s.progress(40);
        assert_eq!(s, SaveState::Saving { progress: 40 });

        s.finish();
        assert_eq!(s, SaveState::Idle);
    }

    #[test]
    fn batch_state_tracks_events() {
        let mut b = BatchState::default();
        b.apply(BatchEvent::Progress(10));
        assert_eq!(b, BatchState::Idle);

        b.begin(2);
        b.apply(BatchEvent::FileStarted { index: 1, total: 2 });
        b.apply(BatchEvent::Progress(70));
        assert_eq!(
            b,
            BatchState::Converting {
                current: 1,
                total: 2,
                progress: 70
            }
        );

        b.apply(BatchEvent::FileStarted { index: 2, total: 2 });
        assert_eq!(
            b,
            BatchState::Converting {
                current: 2,
                total: 2,
                progress: 0
            }
        );

        b.finish();
        assert!(!b.is_busy());
    }
}
