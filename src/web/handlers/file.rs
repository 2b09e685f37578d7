//! File handlers for the CloudStore web API.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use utoipa;

use crate::content::{decode_data_url, encode_data_url};
use crate::store::{FileUpdate, NewFile};
use crate::web::dto::{
    ApiQuery, FileResponse, ListFilesQuery, MessageResponse, RecentFilesQuery, UpdateFileRequest,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Default number of entries for the recent-files listing.
const DEFAULT_RECENT_LIMIT: usize = 4;

/// Generate a safe Content-Disposition header value for file downloads.
///
/// Filenames pass through user control, so the value is sanitized against
/// header injection and non-ASCII names get an RFC 5987 `filename*`
/// parameter.
fn content_disposition_header(filename: &str) -> String {
    // Clean ASCII names go out as-is.
    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{}\"", filename);
    }

    // ASCII fallback: strip control characters (CR, LF and friends) and
    // neutralize quotes and backslashes.
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    let encoded = urlencoding::encode(filename);

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        sanitized, encoded
    )
}

/// GET /api/files - List files in a folder (root level by default).
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(
        ("folderId" = Option<i64>, Query, description = "Folder ID (omit or empty for root)")
    ),
    responses(
        (status = 200, description = "List of files", body = Vec<FileResponse>)
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let files = {
        let store = state.store.lock().await;
        store.get_files(state.current_user_id, query.folder_id)
    };

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// GET /api/files/recent - Most recently updated files.
#[utoipa::path(
    get,
    path = "/files/recent",
    tag = "files",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum number of files (default 4)")
    ),
    responses(
        (status = 200, description = "Recently updated files", body = Vec<FileResponse>)
    )
)]
pub async fn recent_files(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<RecentFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);

    let files = {
        let store = state.store.lock().await;
        store.get_recent_files(state.current_user_id, limit)
    };

    Ok(Json(files.into_iter().map(FileResponse::from).collect()))
}

/// GET /api/files/:id - File metadata with the content data URL.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File metadata with content", body = FileResponse),
        (status = 404, description = "File not found")
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Json<FileResponse>, ApiError> {
    let (file, content) = {
        let store = state.store.lock().await;

        let file = store
            .get_file_by_id(file_id)
            .ok_or_else(|| ApiError::not_found("File not found"))?;
        let content = store.get_file_content(file_id);

        (file, content)
    };

    Ok(Json(FileResponse::from(file).with_data_url(content)))
}

/// POST /api/files/upload - Create a file from a multipart upload.
///
/// Request body: multipart/form-data with a "file" part and an optional
/// "folderId" part.
#[utoipa::path(
    post,
    path = "/files/upload",
    tag = "files",
    responses(
        (status = 201, description = "File created", body = FileResponse),
        (status = 400, description = "No file, file too large or storage limit exceeded"),
        (status = 404, description = "User not found")
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let mut filename: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut folder_id: Option<i64> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                filename = field.file_name().map(|s| s.to_string());
                mime_type = field.content_type().map(|s| s.to_string());
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            tracing::error!("Failed to read file content: {}", e);
                            ApiError::bad_request("Failed to read file")
                        })?
                        .to_vec(),
                );
            }
            "folderId" => {
                let text = field.text().await.map_err(|e| {
                    tracing::error!("Failed to read folderId field: {}", e);
                    ApiError::bad_request("Invalid folderId")
                })?;
                if !text.is_empty() {
                    folder_id = Some(
                        text.parse()
                            .map_err(|_| ApiError::bad_request("Invalid folderId"))?,
                    );
                }
            }
            _ => {}
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    // Per-file size ceiling, checked before the quota.
    if content.len() as u64 > state.max_upload_size {
        let max_mb = state.max_upload_size / 1024 / 1024;
        return Err(ApiError::bad_request(format!(
            "File too large (max {}MB)",
            max_mb
        )));
    }

    // MIME type: multipart part header, then the filename extension.
    let mime_type = mime_type.unwrap_or_else(|| {
        mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string()
    });
    let size = content.len() as i64;

    let file = {
        let mut store = state.store.lock().await;

        let user = store
            .get_user(state.current_user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?;

        // Quota admission control; the engine itself never rejects.
        if user.storage_used + size > user.storage_limit {
            return Err(ApiError::bad_request("Storage limit exceeded"));
        }

        let mut new_file = NewFile::new(
            filename,
            mime_type.clone(),
            size,
            uuid::Uuid::new_v4().to_string(),
            state.current_user_id,
        );
        if let Some(folder_id) = folder_id {
            new_file = new_file.with_folder(folder_id);
        }

        let file = store.create_file(&new_file)?;
        store.set_file_content(file.id, encode_data_url(&mime_type, &content));
        file
    };

    Ok((StatusCode::CREATED, Json(FileResponse::from(file))))
}

/// PUT /api/files/:id - Partial update of a file.
#[utoipa::path(
    put,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    request_body = UpdateFileRequest,
    responses(
        (status = 200, description = "Updated file", body = FileResponse),
        (status = 404, description = "File not found")
    )
)]
pub async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
    Json(req): Json<UpdateFileRequest>,
) -> Result<Json<FileResponse>, ApiError> {
    let file = {
        let mut store = state.store.lock().await;

        if store.get_file_by_id(file_id).is_none() {
            return Err(ApiError::not_found("File not found"));
        }

        let mut update = FileUpdate::new();
        if let Some(name) = req.name {
            update = update.name(name);
        }
        if let Some(folder_id) = req.folder_id {
            update = update.folder_id(folder_id);
        }
        if let Some(is_starred) = req.is_starred {
            update = update.starred(is_starred);
        }
        if let Some(size) = req.size {
            update = update.size(size);
        }

        store.update_file(file_id, &update)?
    };

    Ok(Json(FileResponse::from(file)))
}

/// DELETE /api/files/:id - Soft-delete a file.
#[utoipa::path(
    delete,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File deleted", body = MessageResponse),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = {
        let mut store = state.store.lock().await;
        store.delete_file(file_id)
    };

    if !deleted {
        return Err(ApiError::not_found("File not found"));
    }

    Ok(Json(MessageResponse::new("File deleted successfully")))
}

/// GET /api/files/:id/download - Download a file as raw bytes.
#[utoipa::path(
    get,
    path = "/files/{id}/download",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "File content", content_type = "application/octet-stream"),
        (status = 404, description = "File or content not found"),
        (status = 500, description = "Stored content is malformed")
    )
)]
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<i64>,
) -> Result<Response<Body>, ApiError> {
    let (file, content) = {
        let store = state.store.lock().await;

        let file = store
            .get_file_by_id(file_id)
            .ok_or_else(|| ApiError::not_found("File not found"))?;
        let content = store
            .get_file_content(file_id)
            .ok_or_else(|| ApiError::not_found("File content not found"))?;

        (file, content)
    };

    let (mime_type, bytes) = decode_data_url(&content)?;

    let response = Response::builder()
        .header(header::CONTENT_TYPE, mime_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&file.name),
        )
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal("Failed to build response")
        })?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_header_simple_ascii() {
        let result = content_disposition_header("document.txt");
        assert_eq!(result, "attachment; filename=\"document.txt\"");
    }

    #[test]
    fn test_content_disposition_header_with_spaces() {
        let result = content_disposition_header("my document.txt");
        assert_eq!(result, "attachment; filename=\"my document.txt\"");
    }

    #[test]
    fn test_content_disposition_header_non_ascii() {
        let result = content_disposition_header("résumé.pdf");
        assert!(result.starts_with("attachment; filename=\""));
        assert!(result.contains("filename*=UTF-8''"));
        assert!(result.contains("r%C3%A9sum%C3%A9.pdf"));
    }

    #[test]
    fn test_content_disposition_header_double_quote() {
        let result = content_disposition_header("test\"file.txt");
        assert!(result.contains("filename=\"test_file.txt\""));
        assert!(result.contains("filename*=UTF-8''"));
        assert!(result.contains("%22"));
    }

    #[test]
    fn test_content_disposition_header_backslash() {
        let result = content_disposition_header("test\\file.txt");
        assert!(result.contains("filename=\"test_file.txt\""));
        assert!(result.contains("filename*=UTF-8''"));
    }

    #[test]
    fn test_content_disposition_header_header_injection() {
        let result = content_disposition_header("test\r\nX-Injected: bad.txt");
        assert!(!result.contains('\r'));
        assert!(!result.contains('\n'));
        assert!(result.starts_with("attachment; filename="));
    }

    #[test]
    fn test_content_disposition_header_null_character() {
        let result = content_disposition_header("test\x00null.txt");
        assert!(!result.contains('\x00'));
        assert!(result.starts_with("attachment; filename="));
    }
}
