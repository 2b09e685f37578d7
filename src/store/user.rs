//! User records and quota bookkeeping.

use crate::store::{MemStore, DEFAULT_STORAGE_LIMIT};
use crate::{CloudStoreError, Result};

/// A registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Password, kept opaque. Never exposed through the web layer.
    pub password: String,
    /// Storage quota in bytes.
    pub storage_limit: i64,
    /// Bytes currently charged for the user's non-deleted files.
    pub storage_used: i64,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl NewUser {
    /// Create a new NewUser.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl MemStore {
    /// Look up a user by ID.
    pub fn get_user(&self, id: i64) -> Option<User> {
        self.users.get(&id).cloned()
    }

    /// Look up a user by username.
    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Create a user with the default quota and zero usage.
    ///
    /// Usernames are not checked for uniqueness; callers that care use
    /// [`MemStore::get_user_by_username`] first.
    pub fn create_user(&mut self, new_user: &NewUser) -> User {
        let id = self.next_user_id;
        self.next_user_id += 1;

        let user = User {
            id,
            username: new_user.username.clone(),
            password: new_user.password.clone(),
            storage_limit: DEFAULT_STORAGE_LIMIT,
            storage_used: 0,
        };
        self.users.insert(id, user.clone());
        user
    }

    /// Apply a byte delta to a user's storage usage, floored at zero.
    ///
    /// Fails with NotFound if the user does not exist.
    pub fn update_user_storage_used(&mut self, user_id: i64, bytes_delta: i64) -> Result<User> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| CloudStoreError::NotFound(format!("user {user_id}")))?;

        user.storage_used = (user.storage_used + bytes_delta).max(0);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user() {
        let mut store = MemStore::new();

        let user = store.create_user(&NewUser::new("alice", "secret"));

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "secret");
        assert_eq!(user.storage_limit, DEFAULT_STORAGE_LIMIT);
        assert_eq!(user.storage_used, 0);
    }

    #[test]
    fn test_user_ids_increase() {
        let mut store = MemStore::new();

        let first = store.create_user(&NewUser::new("alice", "a"));
        let second = store.create_user(&NewUser::new("bob", "b"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_get_user() {
        let mut store = MemStore::new();
        let created = store.create_user(&NewUser::new("alice", "secret"));

        let found = store.get_user(created.id).unwrap();
        assert_eq!(found.username, "alice");

        assert!(store.get_user(9999).is_none());
    }

    #[test]
    fn test_get_user_by_username() {
        let mut store = MemStore::new();
        store.create_user(&NewUser::new("alice", "a"));
        store.create_user(&NewUser::new("bob", "b"));

        let found = store.get_user_by_username("bob").unwrap();
        assert_eq!(found.id, 2);

        assert!(store.get_user_by_username("carol").is_none());
    }

    #[test]
    fn test_duplicate_usernames_are_not_rejected() {
        let mut store = MemStore::new();
        store.create_user(&NewUser::new("alice", "first"));
        store.create_user(&NewUser::new("alice", "second"));

        // Lookup finds the earliest record.
        let found = store.get_user_by_username("alice").unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(found.password, "first");
    }

    #[test]
    fn test_update_storage_used() {
        let mut store = MemStore::new();
        let user = store.create_user(&NewUser::new("alice", "a"));

        let updated = store.update_user_storage_used(user.id, 1000).unwrap();
        assert_eq!(updated.storage_used, 1000);

        let updated = store.update_user_storage_used(user.id, -400).unwrap();
        assert_eq!(updated.storage_used, 600);
    }

    #[test]
    fn test_update_storage_used_floors_at_zero() {
        let mut store = MemStore::new();
        let user = store.create_user(&NewUser::new("alice", "a"));

        store.update_user_storage_used(user.id, 100).unwrap();
        let updated = store.update_user_storage_used(user.id, -500).unwrap();

        assert_eq!(updated.storage_used, 0);
    }

    #[test]
    fn test_update_storage_used_unknown_user() {
        let mut store = MemStore::new();

        let result = store.update_user_storage_used(42, 100);
        assert!(matches!(result, Err(CloudStoreError::NotFound(_))));
    }
}
