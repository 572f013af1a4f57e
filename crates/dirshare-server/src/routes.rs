//! Routing table.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// The router needs no socket, so it can be driven directly in tests.
pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit();

    Router::new()
        .route("/", get(handlers::status))
        .route(
            "/files",
            get(handlers::browse_root).post(handlers::upload_root),
        )
        .route(
            "/files/",
            get(handlers::browse_root).post(handlers::upload_root),
        )
        .route(
            "/files/{*path}",
            get(handlers::browse).post(handlers::upload),
        )
        .route("/download_folder", get(handlers::download_root))
        .route("/download_folder/", get(handlers::download_root))
        .route("/download_folder/{*path}", get(handlers::download_folder))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
