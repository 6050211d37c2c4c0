//! core/tags/mod.rs
//!
//! ID3 tag extraction utilities.
//! Public API:
//! - [`extract_metadata`] reads a WAV (or bare ID3 stream) into a [`TagMetadata`].
//! - [`extract_or_default`] is the non-fatal version the upload flow uses.
//! - [`load_picture`] reads an image file chosen as album art.
//!
//! [`TagMetadata`]: super::types::TagMetadata

mod art;
mod read;
mod util;

pub use art::{IMAGE_EXTENSIONS, load_picture};
pub use read::{extract_metadata, extract_or_default};
