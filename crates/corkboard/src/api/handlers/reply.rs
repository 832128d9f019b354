//! Reply/create form handling.
//!
//! GET renders a blank (or reply) form; POST validates, then either
//! previews without persisting or saves and redirects to the new
//! message's view. Validation failures never escape this module; the form
//! is re-rendered with messages.

use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::api::templates::MessRepTemplate;
use crate::message::{NewMessage, repository};
use crate::render;

/// Maximum message body size.
const MAX_MESSAGE_SIZE: usize = 100 * 1024;

/// Maximum author name size.
const MAX_AUTHOR_SIZE: usize = 120;

/// Author recorded when the form leaves the name blank.
const DEFAULT_AUTHOR: &str = "anon";

/// Submitted reply form.
#[derive(Debug, Deserialize)]
pub struct ReplyForm {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, rename = "messRepButton")]
    pub button: String,
}

impl ReplyForm {
    /// Validate the form. Pure; returns the list of user-visible problems.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.message.trim().is_empty() {
            errors.push("Your Message is required.".to_string());
        }
        if self.message.len() > MAX_MESSAGE_SIZE {
            errors.push("Your Message is too long.".to_string());
        }
        if self.author.len() > MAX_AUTHOR_SIZE {
            errors.push("Name is too long.".to_string());
        }
        errors
    }

    /// The author to record, defaulting when blank.
    pub fn author_or_default(&self) -> String {
        let author = self.author.trim();
        if author.is_empty() {
            DEFAULT_AUTHOR.to_string()
        } else {
            author.to_string()
        }
    }

    fn is_preview(&self) -> bool {
        self.button == "preview"
    }
}

/// Fetch the parent message's rendered view, when replying.
async fn parent_html(state: &AppState, id: Option<&str>) -> ApiResult<String> {
    let Some(id) = id else {
        return Ok(String::new());
    };
    let m = state
        .messages
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("message {} not found", id)))?;
    Ok(render::view_full(&m))
}

fn form_action(reply_to: Option<&str>) -> String {
    match reply_to {
        Some(id) => format!("/messRep/{}", id),
        None => "/messRep".to_string(),
    }
}

fn render_form(
    state: &AppState,
    reply_to: Option<&str>,
    parent_html: String,
    form: Option<&ReplyForm>,
    errors: Vec<String>,
    preview_html: String,
) -> Html<String> {
    let template = MessRepTemplate {
        site_title: state.board.title.clone(),
        is_reply: reply_to.is_some(),
        parent_html,
        form_action: form_action(reply_to),
        errors,
        preview_html,
        message: form.map(|f| f.message.clone()).unwrap_or_default(),
        author: form.map(|f| f.author.clone()).unwrap_or_default(),
    };
    Html(template.to_string())
}

async fn handle_form(state: AppState, reply_to: Option<String>) -> ApiResult<Html<String>> {
    let parent = parent_html(&state, reply_to.as_deref()).await?;
    Ok(render_form(
        &state,
        reply_to.as_deref(),
        parent,
        None,
        Vec::new(),
        String::new(),
    ))
}

async fn handle_submit(
    state: AppState,
    reply_to: Option<String>,
    form: ReplyForm,
) -> ApiResult<Response> {
    let parent = parent_html(&state, reply_to.as_deref()).await?;

    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(render_form(
            &state,
            reply_to.as_deref(),
            parent,
            Some(&form),
            errors,
            String::new(),
        )
        .into_response());
    }

    if form.is_preview() {
        let preview = repository::render_markdown(&form.message);
        return Ok(render_form(
            &state,
            reply_to.as_deref(),
            parent,
            Some(&form),
            Vec::new(),
            preview,
        )
        .into_response());
    }

    let message = state
        .messages
        .save(NewMessage {
            author_id: form.author_or_default(),
            source: form.message,
            reply_to: reply_to.clone(),
        })
        .await?;
    info!(id = %message.id, reply_to = ?reply_to, "Created message");

    // Redirect::to responds 303, so a reload of the view won't repost.
    Ok(Redirect::to(&message.url()).into_response())
}

/// Render a blank new-message form.
#[instrument(skip(state))]
pub async fn mess_rep_form(State(state): State<AppState>) -> ApiResult<Html<String>> {
    handle_form(state, None).await
}

/// Render a reply form for message {id}.
#[instrument(skip(state))]
pub async fn mess_rep_form_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    handle_form(state, Some(id)).await
}

/// Handle a new-message submission.
#[instrument(skip(state, form))]
pub async fn mess_rep_submit(
    State(state): State<AppState>,
    Form(form): Form<ReplyForm>,
) -> ApiResult<Response> {
    handle_submit(state, None, form).await
}

/// Handle a reply submission for message {id}.
#[instrument(skip(state, form))]
pub async fn mess_rep_submit_reply(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReplyForm>,
) -> ApiResult<Response> {
    handle_submit(state, Some(id), form).await
}
