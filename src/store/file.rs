//! File records, quota-coupled mutations and content accessors.

use chrono::{DateTime, Utc};

use crate::store::{FileEntry, MemStore};
use crate::{CloudStoreError, Result};

/// A stored file's public record.
///
/// The content payload is held separately by the store and never appears
/// here; see [`MemStore::get_file_content`].
#[derive(Debug, Clone)]
pub struct File {
    /// Unique file ID.
    pub id: i64,
    /// Display name, usually the uploaded filename.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes, as charged against the owner's quota.
    pub size: i64,
    /// Opaque storage identifier. Not a filesystem path.
    pub path: String,
    /// Owning user ID.
    pub user_id: i64,
    /// Containing folder ID (None for the root level).
    pub folder_id: Option<i64>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last modified.
    pub updated_at: DateTime<Utc>,
    /// Whether the user starred the file.
    pub is_starred: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// Display name.
    pub name: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Opaque storage identifier.
    pub path: String,
    /// Owning user ID.
    pub user_id: i64,
    /// Containing folder ID (None for the root level).
    pub folder_id: Option<i64>,
}

impl NewFile {
    /// Create a new NewFile at the root level.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: i64,
        path: impl Into<String>,
        user_id: i64,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            path: path.into(),
            user_id,
            folder_id: None,
        }
    }

    /// Place the file inside a folder.
    pub fn with_folder(mut self, folder_id: i64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }
}

/// Builder for updating a file.
#[derive(Debug, Clone, Default)]
pub struct FileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New containing folder (outer None = leave unchanged, inner None = root).
    pub folder_id: Option<Option<i64>>,
    /// New starred flag.
    pub is_starred: Option<bool>,
    /// New size in bytes.
    pub size: Option<i64>,
}

impl FileUpdate {
    /// Create a new FileUpdate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the containing folder.
    pub fn folder_id(mut self, folder_id: Option<i64>) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    /// Set the starred flag.
    pub fn starred(mut self, is_starred: bool) -> Self {
        self.is_starred = Some(is_starred);
        self
    }

    /// Set the size.
    pub fn size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.folder_id.is_none()
            && self.is_starred.is_none()
            && self.size.is_none()
    }
}

impl MemStore {
    /// List non-deleted files owned by a user in exactly the given folder.
    ///
    /// `None` means the root level. Matching is exact; there is no
    /// sub-tree recursion.
    pub fn get_files(&self, user_id: i64, folder_id: Option<i64>) -> Vec<File> {
        self.files
            .values()
            .filter(|entry| {
                entry.meta.user_id == user_id
                    && entry.meta.folder_id == folder_id
                    && !entry.meta.is_deleted
            })
            .map(|entry| entry.meta.clone())
            .collect()
    }

    /// The user's most recently updated non-deleted files.
    ///
    /// Sorted by `updated_at` descending; equal timestamps keep insertion
    /// order.
    pub fn get_recent_files(&self, user_id: i64, limit: usize) -> Vec<File> {
        let mut files: Vec<File> = self
            .files
            .values()
            .filter(|entry| entry.meta.user_id == user_id && !entry.meta.is_deleted)
            .map(|entry| entry.meta.clone())
            .collect();

        files.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        files.truncate(limit);
        files
    }

    /// Look up a file by ID. Soft-deleted records are still returned.
    pub fn get_file_by_id(&self, id: i64) -> Option<File> {
        self.files.get(&id).map(|entry| entry.meta.clone())
    }

    /// Create a file record and charge its size against the owner's quota.
    ///
    /// The record is inserted before the quota charge, so a missing owner
    /// surfaces as an error while the file stays recorded. Callers wanting
    /// admission control check the owner and quota beforehand.
    pub fn create_file(&mut self, new_file: &NewFile) -> Result<File> {
        let id = self.next_file_id;
        self.next_file_id += 1;

        let now = Utc::now();
        let file = File {
            id,
            name: new_file.name.clone(),
            mime_type: new_file.mime_type.clone(),
            size: new_file.size,
            path: new_file.path.clone(),
            user_id: new_file.user_id,
            folder_id: new_file.folder_id,
            created_at: now,
            updated_at: now,
            is_starred: false,
            is_deleted: false,
        };
        self.files.insert(
            id,
            FileEntry {
                meta: file.clone(),
                content: None,
            },
        );

        self.update_user_storage_used(new_file.user_id, new_file.size)?;

        Ok(file)
    }

    /// Merge updates into a file and refresh its `updated_at`.
    ///
    /// Fails with NotFound if the file does not exist. A size change
    /// adjusts the owner's storage usage by the delta. `folder_id` is not
    /// checked for referential integrity.
    pub fn update_file(&mut self, id: i64, update: &FileUpdate) -> Result<File> {
        let entry = self
            .files
            .get_mut(&id)
            .ok_or_else(|| CloudStoreError::NotFound(format!("file {id}")))?;

        let old_size = entry.meta.size;
        let user_id = entry.meta.user_id;

        if let Some(ref name) = update.name {
            entry.meta.name = name.clone();
        }
        if let Some(folder_id) = update.folder_id {
            entry.meta.folder_id = folder_id;
        }
        if let Some(is_starred) = update.is_starred {
            entry.meta.is_starred = is_starred;
        }
        if let Some(size) = update.size {
            entry.meta.size = size;
        }
        entry.meta.updated_at = Utc::now();

        let updated = entry.meta.clone();

        if let Some(size) = update.size {
            if size != old_size {
                self.update_user_storage_used(user_id, size - old_size)?;
            }
        }

        Ok(updated)
    }

    /// Soft-delete a file and release its size from the owner's quota.
    ///
    /// Idempotent: deleting an already-deleted file reports success
    /// without touching the quota again. Returns false only if the id is
    /// unknown.
    pub fn delete_file(&mut self, id: i64) -> bool {
        let Some(entry) = self.files.get_mut(&id) else {
            return false;
        };
        if entry.meta.is_deleted {
            return true;
        }

        entry.meta.is_deleted = true;
        entry.meta.updated_at = Utc::now();
        let size = entry.meta.size;
        let user_id = entry.meta.user_id;

        // The quota release is a no-op when the owner record is missing.
        let _ = self.update_user_storage_used(user_id, -size);

        true
    }

    /// Read a file's stored content payload.
    pub fn get_file_content(&self, id: i64) -> Option<String> {
        self.files.get(&id).and_then(|entry| entry.content.clone())
    }

    /// Attach a content payload to a file.
    ///
    /// Returns false if the file does not exist.
    pub fn set_file_content(&mut self, id: i64, content: impl Into<String>) -> bool {
        match self.files.get_mut(&id) {
            Some(entry) => {
                entry.content = Some(content.into());
                true
            }
            None => false,
        }
    }
}
