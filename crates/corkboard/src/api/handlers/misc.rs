//! Health check and root redirect.

use axum::{Json, response::Redirect};
use serde_json::{Value, json};

/// Health check endpoint.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// The root redirects to the message list.
pub async fn index() -> Redirect {
    Redirect::temporary("/messList")
}
