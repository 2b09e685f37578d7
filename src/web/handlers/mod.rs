//! API handlers for the CloudStore web layer.

pub mod file;
pub mod folder;
pub mod user;

pub use file::*;
pub use folder::*;
pub use user::*;

use crate::store::SharedStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Storage engine handle.
    pub store: SharedStore,
    /// Identity every request acts as. There is no authentication; the
    /// caller identity is fixed at startup.
    pub current_user_id: i64,
    /// Maximum accepted upload size in bytes.
    pub max_upload_size: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: SharedStore, current_user_id: i64, max_upload_size: u64) -> Self {
        Self {
            store,
            current_user_id,
            max_upload_size,
        }
    }
}
