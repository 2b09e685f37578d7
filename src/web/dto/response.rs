//! Response DTOs for the CloudStore web API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::store::{File, Folder, User};

/// Current user response.
///
/// The stored password never leaves the server.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Storage quota in bytes.
    pub storage_limit: i64,
    /// Bytes currently in use.
    pub storage_used: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            storage_limit: user.storage_limit,
            storage_used: user.storage_used,
        }
    }
}

/// File response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    /// File ID.
    pub id: i64,
    /// File name.
    pub name: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: i64,
    /// Opaque storage identifier.
    pub path: String,
    /// Owning user ID.
    pub user_id: i64,
    /// Containing folder ID (null for the root level).
    pub folder_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Starred flag.
    pub is_starred: bool,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Content as a data URL. Only the single-file endpoint sets this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            name: file.name,
            mime_type: file.mime_type,
            size: file.size,
            path: file.path,
            user_id: file.user_id,
            folder_id: file.folder_id,
            created_at: file.created_at,
            updated_at: file.updated_at,
            is_starred: file.is_starred,
            is_deleted: file.is_deleted,
            data_url: None,
        }
    }
}

impl FileResponse {
    /// Attach the stored content as a data URL.
    pub fn with_data_url(mut self, data_url: Option<String>) -> Self {
        self.data_url = data_url;
        self
    }
}

/// Folder response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    /// Folder ID.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Owning user ID.
    pub user_id: i64,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete flag.
    pub is_deleted: bool,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            user_id: folder.user_id,
            parent_id: folder.parent_id,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
            is_deleted: folder.is_deleted,
        }
    }
}

/// Message response for delete operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
