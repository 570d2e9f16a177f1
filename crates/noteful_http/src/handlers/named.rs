//! `/folders` and `/tags` handlers.
//!
//! Both collections share one handler set; the router attaches the
//! [`Collection`] as a request extension.

use super::{created, deleted, found, run_blocking};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::{Extension, Json};
use noteful_core::{
    Collection, NamedPayload, NamedRecord, NamedRecordService, SqliteNamedRecordRepository,
};

fn service(
    conn: &rusqlite::Connection,
    collection: Collection,
) -> NamedRecordService<SqliteNamedRecordRepository<'_>> {
    NamedRecordService::new(SqliteNamedRecordRepository::new(conn, collection))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
) -> Result<Json<Vec<NamedRecord>>, ApiError> {
    let records = run_blocking(&state.db, move |conn| service(conn, collection).list()).await?;
    Ok(Json(records))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> Result<Json<NamedRecord>, ApiError> {
    found(run_blocking(&state.db, move |conn| service(conn, collection).get(&id)).await?)
}

pub(crate) async fn create(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<NamedPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let record =
        run_blocking(&state.db, move |conn| service(conn, collection).create(payload)).await?;
    created(&uri, record.id.as_str(), &record)
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    payload: Result<Json<NamedPayload>, JsonRejection>,
) -> Result<Json<NamedRecord>, ApiError> {
    let Json(payload) = payload?;
    found(
        run_blocking(&state.db, move |conn| {
            service(conn, collection).update(&id, payload)
        })
        .await?,
    )
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    deleted(run_blocking(&state.db, move |conn| service(conn, collection).delete(&id)).await?)
}
