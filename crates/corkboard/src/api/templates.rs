//! Askama page templates.
//!
//! The handlers fill these with pre-rendered fragments from the core
//! (message lists, pagination blocks); user-controlled scalar fields are
//! escaped by the templates themselves.

use askama::Template;

use crate::list::FormattingOptions;

/// A message list page (/messList and /blog/{author}).
#[derive(Template)]
#[template(path = "mess_list.html")]
pub struct MessListTemplate {
    pub site_title: String,
    pub heading: String,
    /// Where the toggle form submits back to.
    pub form_action: String,
    pub options: FormattingOptions,
    pub pagination_before: String,
    pub messages: String,
    pub pagination_after: String,
    pub page_js: String,
}

/// A single message view (/mess/{id}).
#[derive(Template)]
#[template(path = "mess.html")]
pub struct MessTemplate {
    pub site_title: String,
    pub id: String,
    pub message_html: String,
}

/// A message's raw source (/messSource/{id}).
#[derive(Template)]
#[template(path = "mess_source.html")]
pub struct MessSourceTemplate {
    pub site_title: String,
    pub id: String,
    pub source: String,
}

/// The reply/create form (/messRep and /messRep/{id}).
#[derive(Template)]
#[template(path = "mess_rep.html")]
pub struct MessRepTemplate {
    pub site_title: String,
    pub is_reply: bool,
    /// Rendered view of the message being replied to; empty for a new post.
    pub parent_html: String,
    pub form_action: String,
    pub errors: Vec<String>,
    /// Rendered preview of the submitted text; empty unless previewing.
    pub preview_html: String,
    /// Previously submitted field values, echoed back into the form.
    pub message: String,
    pub author: String,
}
