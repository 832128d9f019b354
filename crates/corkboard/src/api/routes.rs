//! API route definitions.

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    // Tracing layer with request timing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Message lists
        .route("/messList", get(handlers::mess_list))
        .route("/blog/{author}", get(handlers::blog))
        // Single messages
        .route("/mess/{id}", get(handlers::mess))
        .route("/messSource/{id}", get(handlers::mess_source))
        // Reply/create
        .route(
            "/messRep",
            get(handlers::mess_rep_form).post(handlers::mess_rep_submit),
        )
        .route(
            "/messRep/{id}",
            get(handlers::mess_rep_form_reply).post(handlers::mess_rep_submit_reply),
        )
        // Auto-update polling
        .route("/au/messList", get(handlers::au_mess_list))
        .route("/au/blog/{author}", get(handlers::au_blog))
        // Feeds
        .route("/messList/rss", get(handlers::rss_mess_list))
        .route("/blog/{author}/rss", get(handlers::rss_blog))
        // Static assets
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(trace_layer)
        .with_state(state)
}
