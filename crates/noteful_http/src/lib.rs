//! HTTP surface for Noteful.
//!
//! # Responsibility
//! - Route `/notes`, `/folders` and `/tags` requests to core services.
//! - Map service results onto status codes and `{"message": ...}` bodies.
//! - Log one `event=http_request` line per request.
//!
//! # Invariants
//! - Handlers never touch SQLite on the async executor; store calls run on
//!   the blocking pool.
//! - Unmatched routes answer `404 {"message":"Not Found"}`.

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Extension, Router};
use log::info;
use noteful_core::{Collection, Database};
use std::time::Instant;

pub mod error;
mod handlers;

pub use error::ApiError;

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/notes",
            get(handlers::notes::list).post(handlers::notes::create),
        )
        .route(
            "/notes/:id",
            get(handlers::notes::get)
                .put(handlers::notes::update)
                .delete(handlers::notes::delete),
        )
        .nest("/folders", named_routes(Collection::Folders))
        .nest("/tags", named_routes(Collection::Tags))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

fn named_routes(collection: Collection) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::named::list).post(handlers::named::create),
        )
        .route(
            "/:id",
            get(handlers::named::get)
                .put(handlers::named::update)
                .delete(handlers::named::delete),
        )
        .layer(Extension(collection))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    info!(
        "event=http_request module=http status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}
