//! Router configuration for the CloudStore web API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::dto::{
    CreateFolderRequest, FileResponse, FolderResponse, MessageResponse, UpdateFileRequest,
    UpdateFolderRequest,
};
use super::handlers::{
    create_folder, delete_file, delete_folder, download_file, get_current_user, get_file,
    get_folder, list_files, list_folders, recent_files, update_file, update_folder, upload_file,
    AppState,
};

/// Extra request-body headroom on top of the upload ceiling, for
/// multipart framing.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let file_routes = Router::new()
        .route("/", get(list_files))
        .route("/recent", get(recent_files))
        .route("/upload", post(upload_file))
        .route("/:id", get(get_file).put(update_file).delete(delete_file))
        .route("/:id/download", get(download_file));

    let folder_routes = Router::new()
        .route("/", get(list_folders).post(create_folder))
        .route(
            "/:id",
            get(get_folder).put(update_folder).delete(delete_folder),
        );

    let api_routes = Router::new()
        .route("/user", get(get_current_user))
        .nest("/files", file_routes)
        .nest("/folders", folder_routes);

    let body_limit = app_state.max_upload_size as usize + BODY_LIMIT_SLACK;

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// OpenAPI documentation for the file and folder endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::handlers::file::list_files,
        crate::web::handlers::file::recent_files,
        crate::web::handlers::file::get_file,
        crate::web::handlers::file::upload_file,
        crate::web::handlers::file::update_file,
        crate::web::handlers::file::delete_file,
        crate::web::handlers::file::download_file,
        crate::web::handlers::folder::list_folders,
        crate::web::handlers::folder::get_folder,
        crate::web::handlers::folder::create_folder,
        crate::web::handlers::folder::update_folder,
        crate::web::handlers::folder::delete_folder,
    ),
    components(schemas(
        FileResponse,
        FolderResponse,
        MessageResponse,
        CreateFolderRequest,
        UpdateFolderRequest,
        UpdateFileRequest,
    )),
    tags(
        (name = "files", description = "File storage operations"),
        (name = "folders", description = "Folder tree operations")
    ),
    servers((url = "/api"))
)]
struct ApiDoc;

/// Create the Swagger UI router.
pub fn create_swagger_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/files"));
        assert!(doc.paths.paths.contains_key("/files/{id}/download"));
        assert!(doc.paths.paths.contains_key("/folders/{id}"));
    }
}
