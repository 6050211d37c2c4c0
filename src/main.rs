//! Raamp3
//!
//! # What this program is
//! A small desktop app (built with the `iced` GUI library) that takes `.wav` files,
//! reads whatever ID3 tags they carry, lets you edit title/artist/album/year/track/
//! genre/composer + album art, and exports tagged 320 kbps MP3s through `ffmpeg`:
//! one file at a time, or everything at once as a `.zip`.
//!
//! # How Iced works (super simple mental model)
//! - `Raamp3` = the *entire memory* of the app (all the state)
//! - `Message` = “something happened” (file dropped, typed a letter, export finished)
//! - `update(state, message)` = handles that thing and updates state
//! - `view(state)` = draws UI based on the current state
//!
//! **Message happens -> update changes state -> view redraws**
//!
//! # Architecture constraints (on purpose)
//! - `core::*` owns files, tags, conversion, export and playback. No iced in there.
//! - `gui::*` owns state, messages and widgets. It never runs ffmpeg or rodio itself.
//!
//! # Concurrency model
//! - Reading uploads and tags runs on helper threads.
//! - Exports run as async tasks on iced's tokio executor and stream progress back.
//! - All conversions share one encoder handle, so only one ffmpeg runs at a time.

mod config;
mod core;
mod gui;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> iced::Result {
    let (config, config_err) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };

    init_logging(&config);

    match config_err {
        None => tracing::info!("config loaded from {}", Config::config_path().display()),
        Some(e) => tracing::warn!("config unusable ({e:#}); using defaults"),
    }

    iced::application(move || gui::Raamp3::new(&config), gui::update, gui::view)
        .title("Raamp3")
        .subscription(gui::subscription)
        .window_size((820.0, 900.0))
        .run()
}

/// RUST_LOG wins; otherwise `[logging] filter` from the config.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
