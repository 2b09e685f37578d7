//! Folder records and the cascading soft delete.

use chrono::{DateTime, Utc};

use crate::store::MemStore;
use crate::{CloudStoreError, Result};

/// A folder in a user's storage tree.
///
/// Folders form a forest per user: `parent_id` points at another folder
/// of the same user and there is no operation that re-parents a folder,
/// so cycles cannot arise.
#[derive(Debug, Clone)]
pub struct Folder {
    /// Unique folder ID.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Owning user ID.
    pub user_id: i64,
    /// Parent folder ID (None for root folders).
    pub parent_id: Option<i64>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last modified.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

/// Data for creating a new folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// Folder name.
    pub name: String,
    /// Owning user ID.
    pub user_id: i64,
    /// Parent folder ID (None for root folders).
    pub parent_id: Option<i64>,
}

impl NewFolder {
    /// Create a new root-level NewFolder.
    pub fn new(name: impl Into<String>, user_id: i64) -> Self {
        Self {
            name: name.into(),
            user_id,
            parent_id: None,
        }
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

/// Builder for updating a folder.
///
/// Only the name can change; folders are never re-parented.
#[derive(Debug, Clone, Default)]
pub struct FolderUpdate {
    /// New folder name.
    pub name: Option<String>,
}

impl FolderUpdate {
    /// Create a new FolderUpdate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl MemStore {
    /// List non-deleted folders owned by a user under exactly the given
    /// parent. `None` means the root level.
    pub fn get_folders(&self, user_id: i64, parent_id: Option<i64>) -> Vec<Folder> {
        self.folders
            .values()
            .filter(|folder| {
                folder.user_id == user_id
                    && folder.parent_id == parent_id
                    && !folder.is_deleted
            })
            .cloned()
            .collect()
    }

    /// Look up a folder by ID. Soft-deleted records are still returned.
    pub fn get_folder_by_id(&self, id: i64) -> Option<Folder> {
        self.folders.get(&id).cloned()
    }

    /// Create a folder.
    ///
    /// `parent_id` is not validated; the caller checks it when the parent
    /// must exist.
    pub fn create_folder(&mut self, new_folder: &NewFolder) -> Folder {
        let id = self.next_folder_id;
        self.next_folder_id += 1;

        let now = Utc::now();
        let folder = Folder {
            id,
            name: new_folder.name.clone(),
            user_id: new_folder.user_id,
            parent_id: new_folder.parent_id,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        self.folders.insert(id, folder.clone());
        folder
    }

    /// Merge updates into a folder and refresh its `updated_at`.
    ///
    /// Fails with NotFound if the folder does not exist.
    pub fn update_folder(&mut self, id: i64, update: &FolderUpdate) -> Result<Folder> {
        let folder = self
            .folders
            .get_mut(&id)
            .ok_or_else(|| CloudStoreError::NotFound(format!("folder {id}")))?;

        if let Some(ref name) = update.name {
            folder.name = name.clone();
        }
        folder.updated_at = Utc::now();

        Ok(folder.clone())
    }

    /// Cascading soft delete of a folder and everything beneath it.
    ///
    /// Runs in two phases: first collect the whole subtree (every
    /// non-deleted descendant folder, and the non-deleted files each one
    /// holds), then apply the soft deletes. The traversal never observes
    /// its own writes, and a persistent backend could wrap phase two in a
    /// single transaction. Returns false only if the root folder id is
    /// unknown.
    pub fn delete_folder(&mut self, id: i64) -> bool {
        if !self.folders.contains_key(&id) {
            return false;
        }

        let mut folder_ids = vec![id];
        let mut file_ids = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            for entry in self.files.values() {
                if entry.meta.folder_id == Some(current) && !entry.meta.is_deleted {
                    file_ids.push(entry.meta.id);
                }
            }
            for folder in self.folders.values() {
                if folder.parent_id == Some(current) && !folder.is_deleted {
                    folder_ids.push(folder.id);
                    stack.push(folder.id);
                }
            }
        }

        let now = Utc::now();
        for folder_id in folder_ids {
            if let Some(folder) = self.folders.get_mut(&folder_id) {
                folder.is_deleted = true;
                folder.updated_at = now;
            }
        }
        for file_id in file_ids {
            self.delete_file(file_id);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewFile, NewUser};

    fn store_with_user() -> (MemStore, i64) {
        let mut store = MemStore::new();
        let user = store.create_user(&NewUser::new("alice", "secret"));
        (store, user.id)
    }

    #[test]
    fn test_create_folder() {
        let (mut store, user_id) = store_with_user();

        let folder = store.create_folder(&NewFolder::new("Documents", user_id));

        assert_eq!(folder.id, 1);
        assert_eq!(folder.name, "Documents");
        assert_eq!(folder.user_id, user_id);
        assert!(folder.parent_id.is_none());
        assert!(!folder.is_deleted);
        assert_eq!(folder.created_at, folder.updated_at);
    }

    #[test]
    fn test_create_nested_folder() {
        let (mut store, user_id) = store_with_user();

        let parent = store.create_folder(&NewFolder::new("Docs", user_id));
        let child = store.create_folder(&NewFolder::new("2024", user_id).with_parent(parent.id));

        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[test]
    fn test_get_folder_by_id() {
        let (mut store, user_id) = store_with_user();

        let created = store.create_folder(&NewFolder::new("Docs", user_id));

        assert_eq!(store.get_folder_by_id(created.id).unwrap().name, "Docs");
        assert!(store.get_folder_by_id(9999).is_none());
    }

    #[test]
    fn test_get_folders_exact_parent_match() {
        let (mut store, user_id) = store_with_user();

        let parent = store.create_folder(&NewFolder::new("Docs", user_id));
        store.create_folder(&NewFolder::new("2024", user_id).with_parent(parent.id));
        store.create_folder(&NewFolder::new("Pictures", user_id));

        let roots = store.get_folders(user_id, None);
        assert_eq!(roots.len(), 2);

        let children = store.get_folders(user_id, Some(parent.id));
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "2024");
    }

    #[test]
    fn test_get_folders_skips_other_users() {
        let (mut store, user_id) = store_with_user();
        let other = store.create_user(&NewUser::new("bob", "b"));

        store.create_folder(&NewFolder::new("Mine", user_id));
        store.create_folder(&NewFolder::new("Theirs", other.id));

        let folders = store.get_folders(user_id, None);
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Mine");
    }

    #[test]
    fn test_update_folder_rename() {
        let (mut store, user_id) = store_with_user();

        let folder = store.create_folder(&NewFolder::new("Old", user_id));
        let updated = store
            .update_folder(folder.id, &FolderUpdate::new().name("New"))
            .unwrap();

        assert_eq!(updated.name, "New");
        assert!(updated.updated_at > folder.updated_at);
    }

    #[test]
    fn test_update_folder_not_found() {
        let mut store = MemStore::new();

        let result = store.update_folder(42, &FolderUpdate::new().name("x"));
        assert!(matches!(result, Err(CloudStoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_folder_marks_subtree() {
        let (mut store, user_id) = store_with_user();

        let docs = store.create_folder(&NewFolder::new("Docs", user_id));
        let sub = store.create_folder(&NewFolder::new("2024", user_id).with_parent(docs.id));
        let deep = store.create_folder(&NewFolder::new("Q1", user_id).with_parent(sub.id));

        assert!(store.delete_folder(docs.id));

        assert!(store.get_folder_by_id(docs.id).unwrap().is_deleted);
        assert!(store.get_folder_by_id(sub.id).unwrap().is_deleted);
        assert!(store.get_folder_by_id(deep.id).unwrap().is_deleted);
    }

    #[test]
    fn test_delete_folder_cascades_to_files_and_quota() {
        let (mut store, user_id) = store_with_user();

        let docs = store.create_folder(&NewFolder::new("Docs", user_id));
        let sub = store.create_folder(&NewFolder::new("2024", user_id).with_parent(docs.id));

        let file = store
            .create_file(
                &NewFile::new("x.pdf", "application/pdf", 1234, "k1", user_id)
                    .with_folder(sub.id),
            )
            .unwrap();
        assert_eq!(store.get_user(user_id).unwrap().storage_used, 1234);

        assert!(store.delete_folder(docs.id));

        assert!(store.get_file_by_id(file.id).unwrap().is_deleted);
        assert!(store.get_files(user_id, Some(sub.id)).is_empty());
        assert!(store.get_folders(user_id, Some(docs.id)).is_empty());
        assert_eq!(store.get_user(user_id).unwrap().storage_used, 0);
    }

    #[test]
    fn test_delete_folder_leaves_siblings() {
        let (mut store, user_id) = store_with_user();

        let docs = store.create_folder(&NewFolder::new("Docs", user_id));
        let pics = store.create_folder(&NewFolder::new("Pictures", user_id));

        let kept = store
            .create_file(
                &NewFile::new("cat.png", "image/png", 10, "k1", user_id).with_folder(pics.id),
            )
            .unwrap();

        store.delete_folder(docs.id);

        assert!(!store.get_folder_by_id(pics.id).unwrap().is_deleted);
        assert!(!store.get_file_by_id(kept.id).unwrap().is_deleted);
        assert_eq!(store.get_user(user_id).unwrap().storage_used, 10);
    }

    #[test]
    fn test_delete_folder_twice_keeps_quota() {
        let (mut store, user_id) = store_with_user();

        let docs = store.create_folder(&NewFolder::new("Docs", user_id));
        store
            .create_file(
                &NewFile::new("a.txt", "text/plain", 100, "k1", user_id).with_folder(docs.id),
            )
            .unwrap();

        assert!(store.delete_folder(docs.id));
        assert!(store.delete_folder(docs.id));

        assert_eq!(store.get_user(user_id).unwrap().storage_used, 0);
    }

    #[test]
    fn test_delete_folder_unknown() {
        let mut store = MemStore::new();
        assert!(!store.delete_folder(42));
    }

    #[test]
    fn test_folder_update_builder() {
        let update = FolderUpdate::new().name("Renamed");
        assert_eq!(update.name, Some("Renamed".to_string()));
        assert!(!update.is_empty());
        assert!(FolderUpdate::new().is_empty());
    }
}
