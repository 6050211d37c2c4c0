//! core/session.rs
//!
//! File registry + metadata store for one run of the app.
//!
//! - `files` keeps upload order (that order drives batch naming: track-1, track-2, ...)
//! - `metadata` is keyed by `FileId` and stays empty for a file until extraction resolves
//! - all mutation goes through the methods below; the GUI only reads

use std::borrow::Cow;
use std::collections::HashMap;

use super::types::{FileId, Picture, TagField, TagMetadata, UploadedFile};

/// One file + the metadata it should be exported with.
#[derive(Debug, Clone)]
pub struct ExportItem {
    pub file: UploadedFile,
    pub metadata: TagMetadata,
}

#[derive(Debug, Default)]
pub struct Session {
    files: Vec<UploadedFile>,
    metadata: HashMap<FileId, TagMetadata>,
}

impl Session {
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn file(&self, id: FileId) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Register new uploads (appended, in order). Returns their ids.
    pub fn add_files(&mut self, files: Vec<UploadedFile>) -> Vec<FileId> {
        let ids = files.iter().map(|f| f.id).collect();
        self.files.extend(files);
        ids
    }

    /// Extraction finished for `id` (success or fallback defaults).
    ///
    /// Returns false (and keeps the current entry) when the user already
    /// edited this file, or when the id is unknown.
    pub fn resolve_extraction(&mut self, id: FileId, metadata: TagMetadata) -> bool {
        if self.file(id).is_none() {
            return false;
        }
        if self.metadata.contains_key(&id) {
            tracing::debug!("late tag extraction for {id} ignored (already edited)");
            return false;
        }
        self.metadata.insert(id, metadata);
        true
    }

    /// Has extraction (or an edit) produced an entry for `id` yet?
    pub fn is_resolved(&self, id: FileId) -> bool {
        self.metadata.contains_key(&id)
    }

    pub fn metadata(&self, id: FileId) -> Option<&TagMetadata> {
        self.metadata.get(&id)
    }

    /// Entry for `id`, or all-default values while extraction is pending.
    pub fn metadata_or_default(&self, id: FileId) -> Cow<'_, TagMetadata> {
        match self.metadata.get(&id) {
            Some(m) => Cow::Borrowed(m),
            None => Cow::Owned(TagMetadata::default()),
        }
    }

    /// Edit a single text field. Returns false for an unknown id.
    pub fn edit_field(&mut self, id: FileId, field: TagField, value: String) -> bool {
        let Some(entry) = self.entry_mut(id) else {
            return false;
        };
        entry.set_field(field, value);
        true
    }

    /// Replace (or clear) the cover picture. Returns false for an unknown id.
    pub fn set_picture(&mut self, id: FileId, picture: Option<Picture>) -> bool {
        let Some(entry) = self.entry_mut(id) else {
            return false;
        };
        entry.picture = picture;
        true
    }

    pub fn export_item(&self, id: FileId) -> Option<ExportItem> {
        let file = self.file(id)?;
        Some(ExportItem {
            file: file.clone(),
            metadata: self.metadata_or_default(id).into_owned(),
        })
    }

    /// All files in upload order, each with its current metadata.
    pub fn export_items(&self) -> Vec<ExportItem> {
        self.files
            .iter()
            .map(|f| ExportItem {
                file: f.clone(),
                metadata: self.metadata_or_default(f.id).into_owned(),
            })
            .collect()
    }

    fn entry_mut(&mut self, id: FileId) -> Option<&mut TagMetadata> {
        self.file(id)?;
        Some(self.metadata.entry(id).or_default())
    }
}
