//! Message data models.

use chrono::Local;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Timestamp format for `published`. Lexicographic order on these strings
/// equals chronological order, which the sort queries and the auto-update
/// comparison both rely on.
const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Maximum length of a derived message title.
const TITLE_MAX_LEN: usize = 80;

/// A message on the board. Immutable once saved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message ID.
    pub id: String,
    /// Name of the author.
    pub author_id: String,
    /// Display title, derived from the source at save time.
    pub title: String,
    /// Raw Markdown source.
    pub source: String,
    /// Rendered HTML.
    pub html: String,
    /// Publication timestamp, e.g. "2011-12-31T23:55:20".
    pub published: String,
    /// Parent message ID; NULL or empty marks a head post.
    pub reply_to: Option<String>,
}

impl Message {
    /// A head post starts a thread (it replies to nothing).
    pub fn is_head(&self) -> bool {
        self.reply_to.as_deref().is_none_or(|r| r.is_empty())
    }

    /// Site-relative URL of this message's view page.
    pub fn url(&self) -> String {
        format!("/mess/{}", self.id)
    }

    /// Fully-qualified URL, used as the feed entry id.
    pub fn full_url(&self, site_url: &str) -> String {
        format!("{}{}", site_url.trim_end_matches('/'), self.url())
    }
}

/// Input for creating a message. The repository stamps the id, the
/// publication time and the rendered HTML.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub author_id: String,
    pub source: String,
    pub reply_to: Option<String>,
}

/// Current local time in the sortable `published` format.
pub fn published_now() -> String {
    Local::now().format(PUBLISHED_FORMAT).to_string()
}

/// Derive a display title from the first non-empty line of the source,
/// with Markdown heading markers stripped.
pub fn derive_title(source: &str) -> String {
    let line = source
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("(untitled)");
    let line = line.trim_start_matches('#').trim();
    let line = if line.is_empty() { "(untitled)" } else { line };

    if line.chars().count() <= TITLE_MAX_LEN {
        line.to_string()
    } else {
        let cut: String = line.chars().take(TITLE_MAX_LEN).collect();
        format!("{}…", cut.trim_end())
    }
}
