//! `/notes` handlers.

use super::{created, deleted, found, run_blocking};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use noteful_core::{Note, NoteListParams, NotePayload, NoteService, SqliteNoteRepository};

fn service(conn: &rusqlite::Connection) -> NoteService<SqliteNoteRepository<'_>> {
    NoteService::new(SqliteNoteRepository::new(conn))
}

pub(crate) async fn list(
    State(state): State<AppState>,
    params: Result<Query<NoteListParams>, QueryRejection>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let Query(params) = params?;
    let notes = run_blocking(&state.db, move |conn| service(conn).list_notes(&params)).await?;
    Ok(Json(notes))
}

pub(crate) async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    found(run_blocking(&state.db, move |conn| service(conn).get_note(&id)).await?)
}

pub(crate) async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let note = run_blocking(&state.db, move |conn| service(conn).create_note(payload)).await?;
    created(&uri, note.id.as_str(), &note)
}

pub(crate) async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<Json<Note>, ApiError> {
    let Json(payload) = payload?;
    found(run_blocking(&state.db, move |conn| service(conn).update_note(&id, payload)).await?)
}

pub(crate) async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    deleted(run_blocking(&state.db, move |conn| service(conn).delete_note(&id)).await?)
}
