//! core/export/mod.rs
//!
//! The two export flows and the pieces they share.
//! - [`export_single`]: one file -> `<title>.mp3`
//! - [`export_batch`]: every file, in order -> `raamp3_export.zip`
//!
//! Both take the shared `EncoderHandle` and a `Save` destination; the GUI
//! drives `SaveState` / `BatchState` from their progress callbacks.

mod archive;
mod batch;
mod save;
mod single;
mod state;

pub use batch::{BatchEvent, export_batch};
pub use save::{Save, SaveDestination};
pub use single::export_single;
pub use state::{BatchState, SaveState};
