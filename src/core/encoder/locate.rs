//! Find the ffmpeg binary.
//!
//! Searches in order:
//! 1. Configured path (`encoder.ffmpeg_path`)
//! 2. FFMPEG_PATH environment variable
//! 3. Beside current executable
//! 4. PATH

use std::path::{Path, PathBuf};

pub fn find_ffmpeg(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = configured {
        if p.exists() {
            return Some(p.to_path_buf());
        }
        tracing::warn!("configured ffmpeg path {} does not exist", p.display());
    }

    if let Ok(p) = std::env::var("FFMPEG_PATH") {
        let path = PathBuf::from(p);
        if path.exists() {
            return Some(path);
        }
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_in(dir) {
                return Some(p);
            }
        }
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| find_in(&dir))
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    ffmpeg_binary_names()
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn ffmpeg_binary_names() -> &'static [&'static str] {
    #[cfg(windows)]
    return &["ffmpeg.exe", "ffmpeg"];

    #[cfg(not(windows))]
    return &["ffmpeg"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let fake = dir.path().join("my-ffmpeg");
        std::fs::write(&fake, b"").unwrap();

        assert_eq!(find_ffmpeg(Some(&fake)), Some(fake));
    }

    #[test]
    fn finds_binary_by_name_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_in(dir.path()), None);

        let bin = dir.path().join(ffmpeg_binary_names()[0]);
        std::fs::write(&bin, b"").unwrap();
        assert_eq!(find_in(dir.path()), Some(bin));
    }
}
