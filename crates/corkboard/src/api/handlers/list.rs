//! Message list pages and auto-update polling.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    response::Html,
};
use serde::Serialize;
use tracing::instrument;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::api::templates::MessListTemplate;
use crate::list::{FormattingOptions, ListFormatter, ListPage};

/// Auto-update poll response.
#[derive(Debug, Serialize)]
pub struct TsResponse {
    /// Publication timestamp of the newest matching message.
    pub ts: String,
}

/// Build the per-request formatter from the query string.
fn formatter(state: &AppState, page: ListPage, params: &HashMap<String, String>) -> ListFormatter {
    let options = FormattingOptions::from_query(params);
    let skip = params
        .get("skip")
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0);
    ListFormatter::new(
        page,
        options,
        skip,
        state.messages.clone(),
        state.board.clone(),
    )
}

async fn render_list_page(
    state: AppState,
    page: ListPage,
    heading: String,
    params: HashMap<String, String>,
    uri: OriginalUri,
) -> ApiResult<Html<String>> {
    let mut lf = formatter(&state, page, &params);

    let full_path = uri
        .0
        .path_and_query()
        .map_or_else(|| lf.page().url(), |pq| pq.as_str().to_string());

    let template = MessListTemplate {
        site_title: state.board.title.clone(),
        heading,
        form_action: lf.page().url(),
        pagination_before: lf.pagination_before().await?,
        messages: lf.messages_html().await?,
        pagination_after: lf.pagination_after().await?,
        page_js: lf.js_for_page(&full_path).await?,
        options: lf.options().clone(),
    };

    Ok(Html(template.to_string()))
}

/// Recent messages in message-list view.
#[instrument(skip(state, params, uri))]
pub async fn mess_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    uri: OriginalUri,
) -> ApiResult<Html<String>> {
    render_list_page(
        state,
        ListPage::AllMessages,
        "Messages".to_string(),
        params,
        uri,
    )
    .await
}

/// One author's messages.
#[instrument(skip(state, params, uri))]
pub async fn blog(
    State(state): State<AppState>,
    Path(author): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    uri: OriginalUri,
) -> ApiResult<Html<String>> {
    let heading = format!("Blog: {}", author);
    render_list_page(
        state,
        ListPage::Blog { author_id: author },
        heading,
        params,
        uri,
    )
    .await
}

/// Auto-update poll for the message list. Honors the same filter options
/// as the page that started the poll.
#[instrument(skip(state, params))]
pub async fn au_mess_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<TsResponse>> {
    let lf = formatter(&state, ListPage::AllMessages, &params);
    let ts = lf.most_recent_timestamp().await?;
    Ok(Json(TsResponse { ts }))
}

/// Auto-update poll for a blog page.
#[instrument(skip(state, params))]
pub async fn au_blog(
    State(state): State<AppState>,
    Path(author): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<TsResponse>> {
    let lf = formatter(&state, ListPage::Blog { author_id: author }, &params);
    let ts = lf.most_recent_timestamp().await?;
    Ok(Json(TsResponse { ts }))
}
