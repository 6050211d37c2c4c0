//! User config: `<config_dir>/raamp3/config.toml`.
//!
//! Every key is optional; a missing file is created with the defaults.

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Explicit ffmpeg binary. Unset = FFMPEG_PATH, next to the exe, then PATH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Save exports straight into this folder instead of asking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; RUST_LOG wins when set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_volume() -> f32 {
    0.8
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", config_path.display()))
    }

    fn parse(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.playback.volume = config.playback.volume.clamp(0.0, 1.0);
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("raamp3")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let c = Config::parse("").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.logging.filter, "info");
        assert_eq!(c.playback.volume, 0.8);
        assert!(c.encoder.ffmpeg_path.is_none());
        assert!(c.export.directory.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let c = Config::parse(
            r#"
            [encoder]
            ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"

            [playback]
            volume = 3.0
            "#,
        )
        .unwrap();

        assert_eq!(
            c.encoder.ffmpeg_path,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
        assert_eq!(c.playback.volume, 1.0);
        assert_eq!(c.logging.filter, "info");
    }

    #[test]
    fn round_trips_through_toml() {
        let mut c = Config::default();
        c.export.directory = Some(PathBuf::from("/music/out"));
        c.logging.filter = "raamp3=debug".into();

        let text = toml::to_string_pretty(&c).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), c);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(Config::parse("[playback]\nvolume = \"loud\"").is_err());
    }
}
