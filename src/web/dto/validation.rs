//! Validation utilities for web API DTOs.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Deserializes the body as JSON and then runs the `validator` rules on
/// it. Validation failures come back as a 400 response carrying the
/// field-level error list.
///
/// # Example
///
/// ```ignore
/// use cloudstore::web::dto::ValidatedJson;
///
/// async fn create_folder(
///     ValidatedJson(payload): ValidatedJson<CreateFolderRequest>,
/// ) -> Result<Json<FolderResponse>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// A query-string extractor with API-shaped rejections.
///
/// Behaves like [`Query`] but reports deserialization failures with the
/// standard `{"message"}` error body instead of axum's plain-text 400.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e)))?;

        Ok(ApiQuery(value))
    }
}
