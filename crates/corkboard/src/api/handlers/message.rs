//! Single message views.

use axum::{
    extract::{Path, State},
    response::Html,
};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::templates::{MessSourceTemplate, MessTemplate};
use crate::message::Message;
use crate::render;

async fn get_message(state: &AppState, id: &str) -> ApiResult<Message> {
    state
        .messages
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("message {} not found", id)))
}

/// View a single message.
#[instrument(skip(state))]
pub async fn mess(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let m = get_message(&state, &id).await?;

    let template = MessTemplate {
        site_title: state.board.title.clone(),
        id,
        message_html: render::view_full(&m),
    };
    Ok(Html(template.to_string()))
}

/// View a message's raw source, escaped.
#[instrument(skip(state))]
pub async fn mess_source(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let m = get_message(&state, &id).await?;

    let template = MessSourceTemplate {
        site_title: state.board.title.clone(),
        id,
        source: m.source,
    };
    Ok(Html(template.to_string()))
}
