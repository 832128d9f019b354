//! RSS feed endpoints.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::list::{FormattingOptions, ListFormatter, ListPage};

/// RSS content type.
const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

async fn render_feed(state: AppState, page: ListPage) -> ApiResult<Response> {
    // Feeds ignore live display toggles; always default options, page 0.
    let mut lf = ListFormatter::new(
        page,
        FormattingOptions::default(),
        0,
        state.messages.clone(),
        state.board.clone(),
    );
    let body = lf.render_rss().await?;

    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], body).into_response())
}

/// RSS feed for the board-wide message list.
#[instrument(skip(state))]
pub async fn rss_mess_list(State(state): State<AppState>) -> ApiResult<Response> {
    render_feed(state, ListPage::AllMessages).await
}

/// RSS feed for one author's messages.
#[instrument(skip(state))]
pub async fn rss_blog(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> ApiResult<Response> {
    render_feed(state, ListPage::Blog { author_id: author }).await
}
