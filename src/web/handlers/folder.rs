//! Folder handlers for the CloudStore web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::store::{FolderUpdate, NewFolder};
use crate::web::dto::{
    ApiQuery, CreateFolderRequest, FolderResponse, ListFoldersQuery, MessageResponse,
    UpdateFolderRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/folders - List subfolders of a parent (root level by default).
#[utoipa::path(
    get,
    path = "/folders",
    tag = "folders",
    params(
        ("parentId" = Option<i64>, Query, description = "Parent folder ID (omit or empty for root)")
    ),
    responses(
        (status = 200, description = "List of folders", body = Vec<FolderResponse>)
    )
)]
pub async fn list_folders(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListFoldersQuery>,
) -> Result<Json<Vec<FolderResponse>>, ApiError> {
    let folders = {
        let store = state.store.lock().await;
        store.get_folders(state.current_user_id, query.parent_id)
    };

    Ok(Json(folders.into_iter().map(FolderResponse::from).collect()))
}

/// GET /api/folders/:id - Get folder metadata.
#[utoipa::path(
    get,
    path = "/folders/{id}",
    tag = "folders",
    params(
        ("id" = i64, Path, description = "Folder ID")
    ),
    responses(
        (status = 200, description = "Folder metadata", body = FolderResponse),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn get_folder(
    State(state): State<Arc<AppState>>,
    Path(folder_id): Path<i64>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = {
        let store = state.store.lock().await;
        store
            .get_folder_by_id(folder_id)
            .ok_or_else(|| ApiError::not_found("Folder not found"))?
    };

    Ok(Json(FolderResponse::from(folder)))
}

/// POST /api/folders - Create a folder.
#[utoipa::path(
    post,
    path = "/folders",
    tag = "folders",
    request_body = CreateFolderRequest,
    responses(
        (status = 201, description = "Folder created", body = FolderResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_folder(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<FolderResponse>), ApiError> {
    let folder = {
        let mut store = state.store.lock().await;

        let mut new_folder = NewFolder::new(req.name, state.current_user_id);
        if let Some(parent_id) = req.parent_id {
            new_folder = new_folder.with_parent(parent_id);
        }
        store.create_folder(&new_folder)
    };

    Ok((StatusCode::CREATED, Json(FolderResponse::from(folder))))
}

/// PUT /api/folders/:id - Rename a folder.
#[utoipa::path(
    put,
    path = "/folders/{id}",
    tag = "folders",
    params(
        ("id" = i64, Path, description = "Folder ID")
    ),
    request_body = UpdateFolderRequest,
    responses(
        (status = 200, description = "Updated folder", body = FolderResponse),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn update_folder(
    State(state): State<Arc<AppState>>,
    Path(folder_id): Path<i64>,
    Json(req): Json<UpdateFolderRequest>,
) -> Result<Json<FolderResponse>, ApiError> {
    let folder = {
        let mut store = state.store.lock().await;

        if store.get_folder_by_id(folder_id).is_none() {
            return Err(ApiError::not_found("Folder not found"));
        }

        let mut update = FolderUpdate::new();
        if let Some(name) = req.name {
            update = update.name(name);
        }
        store.update_folder(folder_id, &update)?
    };

    Ok(Json(FolderResponse::from(folder)))
}

/// DELETE /api/folders/:id - Cascading soft delete of a folder.
#[utoipa::path(
    delete,
    path = "/folders/{id}",
    tag = "folders",
    params(
        ("id" = i64, Path, description = "Folder ID")
    ),
    responses(
        (status = 200, description = "Folder deleted", body = MessageResponse),
        (status = 404, description = "Folder not found")
    )
)]
pub async fn delete_folder(
    State(state): State<Arc<AppState>>,
    Path(folder_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = {
        let mut store = state.store.lock().await;
        store.delete_folder(folder_id)
    };

    if !deleted {
        return Err(ApiError::not_found("Folder not found"));
    }

    Ok(Json(MessageResponse::new("Folder deleted successfully")))
}
