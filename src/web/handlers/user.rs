//! User handlers for the CloudStore web API.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::web::dto::UserResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /api/user - Get the current user.
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = {
        let store = state.store.lock().await;
        store
            .get_user(state.current_user_id)
            .ok_or_else(|| ApiError::not_found("User not found"))?
    };

    Ok(Json(UserResponse::from(user)))
}
