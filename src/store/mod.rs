//! In-memory storage engine for CloudStore.
//!
//! The engine keeps three tables (users, folders, files) keyed by id,
//! tracks per-user quota usage, and implements cascading soft delete over
//! the folder tree. Records are never physically removed; deletion flips
//! an `is_deleted` flag and the record stays addressable by id.
//!
//! All operations are synchronous. Callers that share a store across
//! tasks wrap it in [`SharedStore`] and hold the lock for the whole
//! logical operation, so read-modify-write sequences such as quota
//! updates never interleave.

mod file;
mod folder;
mod user;

pub use file::{File, FileUpdate, NewFile};
pub use folder::{Folder, FolderUpdate, NewFolder};
pub use user::{NewUser, User};

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Default per-user storage quota in bytes (100 MiB).
pub const DEFAULT_STORAGE_LIMIT: i64 = 104_857_600;

/// Shared handle to the storage engine used by the web layer.
pub type SharedStore = Arc<Mutex<MemStore>>;

/// A file record together with its content payload.
///
/// Content is not part of the public [`File`] shape; it is only reachable
/// through the dedicated content accessors so listings never carry bytes.
#[derive(Debug, Clone)]
struct FileEntry {
    meta: File,
    content: Option<String>,
}

/// In-memory repository of users, folders and files.
///
/// Identifiers are monotonically increasing counters scoped per entity
/// type, starting at 1 and never reused. Nothing is persisted across
/// restarts.
#[derive(Debug)]
pub struct MemStore {
    users: BTreeMap<i64, User>,
    folders: BTreeMap<i64, Folder>,
    files: BTreeMap<i64, FileEntry>,
    next_user_id: i64,
    next_folder_id: i64,
    next_file_id: i64,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            folders: BTreeMap::new(),
            files: BTreeMap::new(),
            next_user_id: 1,
            next_folder_id: 1,
            next_file_id: 1,
        }
    }

    /// Create a store seeded with the implicit demo user.
    ///
    /// The demo user always receives id 1, which the web layer uses as the
    /// caller identity.
    pub fn with_demo_user() -> Self {
        let mut store = Self::new();
        store.create_user(&NewUser::new("demo", "password"));
        store
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = MemStore::new();
        assert!(store.get_user(1).is_none());
        assert!(store.get_folder_by_id(1).is_none());
        assert!(store.get_file_by_id(1).is_none());
    }

    #[test]
    fn test_with_demo_user() {
        let store = MemStore::with_demo_user();

        let user = store.get_user(1).unwrap();
        assert_eq!(user.username, "demo");
        assert_eq!(user.storage_limit, DEFAULT_STORAGE_LIMIT);
        assert_eq!(user.storage_used, 0);
    }

    #[test]
    fn test_ids_are_scoped_per_entity() {
        let mut store = MemStore::new();

        let user = store.create_user(&NewUser::new("alice", "secret"));
        let folder = store.create_folder(&NewFolder::new("Docs", user.id));
        let file = store
            .create_file(&NewFile::new("a.txt", "text/plain", 3, "p1", user.id))
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(folder.id, 1);
        assert_eq!(file.id, 1);
    }
}
