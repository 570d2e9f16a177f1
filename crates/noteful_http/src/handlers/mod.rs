//! Request handlers.

use crate::error::ApiError;
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use noteful_core::{Database, ServiceResult};
use rusqlite::Connection;
use serde::Serialize;

pub(crate) mod named;
pub(crate) mod notes;

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Runs a service call against the store on the blocking pool.
pub(crate) async fn run_blocking<T, F>(db: &Database, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
{
    let db = db.clone();
    tokio::task::spawn_blocking(move || db.with_conn(call))
        .await
        .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
        .map_err(ApiError::from)
}

/// `201 Created` with `Location: <request path>/<id>`.
///
/// The query string is left out; appending the id after it would not name
/// the new resource.
pub(crate) fn created<T: Serialize>(
    uri: &Uri,
    id: &str,
    body: T,
) -> Result<Response, ApiError> {
    let location = format!("{}/{}", uri.path().trim_end_matches('/'), id);
    let location = HeaderValue::from_str(&location)
        .map_err(|err| ApiError::Internal(format!("invalid location header: {err}")))?;
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(body)).into_response())
}

pub(crate) fn found<T>(value: Option<T>) -> Result<Json<T>, ApiError> {
    value.map(Json).ok_or(ApiError::NotFound)
}

pub(crate) fn deleted(removed: bool) -> Result<StatusCode, ApiError> {
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
