//! Turn whatever the user dropped (files, folders) into a list of WAV paths.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Result of expanding dropped/picked paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WavScan {
    pub paths: Vec<PathBuf>,
    /// Files that were not `.wav` (or folders we could not read).
    pub skipped: usize,
}

/// Expand user-supplied paths into WAV files.
///
/// - Plain files are kept in the order given (if they are `.wav`)
/// - Folders are walked recursively; their WAVs are sorted
/// - De-dupes by full path
pub fn collect_wavs(inputs: &[PathBuf]) -> WavScan {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = WavScan::default();

    for input in inputs {
        if input.is_dir() {
            let mut found = Vec::new();
            if let Err(e) = walk_dir(input, &mut found) {
                tracing::warn!("skipping folder {}: {e}", input.display());
                out.skipped += 1;
                continue;
            }
            found.sort();
            for path in found {
                if seen.insert(path.clone()) {
                    out.paths.push(path);
                }
            }
        } else if is_wav(input) {
            if seen.insert(input.clone()) {
                out.paths.push(input.clone());
            }
        } else {
            out.skipped += 1;
        }
    }

    out
}

fn walk_dir(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir).map_err(|e| format!("{dir:?}: {e}"))?;

    for entry in entries {
        let entry = entry.map_err(|e| e.to_string())?;
        let path = entry.path();

        if path.is_dir() {
            walk_dir(&path, out)?;
        } else if is_wav(&path) {
            out.push(path);
        }
    }

    Ok(())
}

pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_wavs_and_counts_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.WAV");
        let b = dir.path().join("b.mp3");
        std::fs::write(&a, b"x").unwrap();
        std::fs::write(&b, b"x").unwrap();

        let scan = collect_wavs(&[a.clone(), b, a.clone()]);
        assert_eq!(scan.paths, vec![a]);
        assert_eq!(scan.skipped, 1);
    }

    #[test]
    fn walks_folders_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("disc 2");
        std::fs::create_dir(&nested).unwrap();

        let z = dir.path().join("z.wav");
        let a = dir.path().join("a.wav");
        let n = nested.join("n.wav");
        for p in [&z, &a, &n] {
            std::fs::write(p, b"x").unwrap();
        }
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let scan = collect_wavs(&[dir.path().to_path_buf()]);
        assert_eq!(scan.paths, vec![a, n, z]);
        assert_eq!(scan.skipped, 0);
    }
}
