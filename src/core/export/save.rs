//! Save-to-disk: native save dialog, or a fixed export folder.

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::core::error::ExportError;

pub trait Save: Send + Sync {
    /// Persist `data` under (roughly) `suggested_name`.
    /// `Ok(None)` means the user cancelled.
    fn save(
        &self,
        data: Vec<u8>,
        suggested_name: &str,
    ) -> impl Future<Output = Result<Option<PathBuf>, ExportError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveDestination {
    /// Ask every time (native dialog).
    Ask,
    /// Write straight into this folder.
    Directory(PathBuf),
}

impl SaveDestination {
    pub fn from_config(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(d) => SaveDestination::Directory(d),
            None => SaveDestination::Ask,
        }
    }
}

impl Save for SaveDestination {
    async fn save(
        &self,
        data: Vec<u8>,
        suggested_name: &str,
    ) -> Result<Option<PathBuf>, ExportError> {
        let target = match self {
            SaveDestination::Ask => {
                let picked = rfd::AsyncFileDialog::new()
                    .set_file_name(suggested_name)
                    .save_file()
                    .await;
                match picked {
                    Some(handle) => handle.path().to_path_buf(),
                    None => return Ok(None),
                }
            }
            SaveDestination::Directory(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                free_path(dir, suggested_name)
            }
        };

        tokio::fs::write(&target, data).await?;
        tracing::info!("saved {}", target.display());
        Ok(Some(target))
    }
}

/// `dir/name`, or `dir/name (1).ext`, `dir/name (2).ext`, ... if taken.
fn free_path(dir: &Path, name: &str) -> PathBuf {
    let first = dir.join(name);
    if !first.exists() {
        return first;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((s, e)) => (s, format!(".{e}")),
        None => (name, String::new()),
    };

    (1..)
        .map(|n| dir.join(format!("{stem} ({n}){ext}")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}
