//! Request DTOs for the CloudStore web API.
//!
//! The wire format is camelCase JSON; the MIME type of a file travels
//! under the key `type`.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

/// Create folder request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID (omit for a root folder).
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Update folder request. Folders can only be renamed.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    /// New folder name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Update file request.
///
/// For `folderId`, an explicit `null` moves the file to the root level
/// while an absent field leaves the location unchanged.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    /// New file name.
    #[serde(default)]
    pub name: Option<String>,
    /// New containing folder.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub folder_id: Option<Option<i64>>,
    /// New starred flag.
    #[serde(default)]
    pub is_starred: Option<bool>,
    /// New size in bytes.
    #[serde(default)]
    pub size: Option<i64>,
}

/// Deserialize a nullable field so that an explicit `null` becomes
/// `Some(None)` while an absent field stays `None` via `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Query parameters for the file listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Folder to list (omit or leave empty for the root level).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub folder_id: Option<i64>,
}

/// Query parameters for the recent-files listing.
#[derive(Debug, Deserialize)]
pub struct RecentFilesQuery {
    /// Maximum number of files to return.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<usize>,
}

/// Query parameters for the folder listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoldersQuery {
    /// Parent folder to list (omit or leave empty for the root level).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<i64>,
}

/// Deserialize an optional query value, treating the empty string as
/// absent. Root browses arrive as `?folderId=` rather than omitting the
/// parameter, and the empty value must read as "no folder".
fn empty_as_none<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: FromStr,
    T::Err: fmt::Display,
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
