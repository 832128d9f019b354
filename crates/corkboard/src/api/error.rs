//! Unified API error handling.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

/// API error type. Storage failures arrive here as anyhow chains and leave
/// as 500s; the HTTP layer decides nothing about retries.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match &self {
            ApiError::Internal(msg) => {
                error!(message = %msg, "API error");
            }
            _ => {
                debug!(message = %message, "Client error");
            }
        }

        // User-visible detail only for client errors; 500s get a bland page.
        let shown = match &self {
            ApiError::Internal(_) => "internal server error".to_string(),
            _ => message,
        };
        let body = Html(format!(
            "<!DOCTYPE html>\n<html><body><h1>{}</h1><p>{}</p></body></html>",
            status, html_escape(&shown)
        ));

        (status, body).into_response()
    }
}

/// Convert anyhow errors (storage failures and the like) to 500s.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(format!("{:#}", err))
    }
}

/// Escape text for inclusion in HTML element content.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
