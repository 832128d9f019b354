//! Message fragment rendering.
//!
//! The list formatter and the single-message pages embed these fragments
//! into the page templates with `|safe`; everything user-controlled is
//! escaped here by Askama.

use askama::Template;

use crate::message::Message;

/// Full view of a single message.
#[derive(Template)]
#[template(path = "message_item.html")]
pub struct MessageItemTemplate<'a> {
    pub m: &'a Message,
}

/// One-line summary of a message.
#[derive(Template)]
#[template(path = "message_one_line.html")]
pub struct MessageOneLineTemplate<'a> {
    pub m: &'a Message,
    pub show_author: bool,
}

/// Render the full view of a message.
pub fn view_full(m: &Message) -> String {
    MessageItemTemplate { m }.to_string()
}

/// Render the one-line summary of a message.
pub fn view_one_line(m: &Message, show_author: bool) -> String {
    MessageOneLineTemplate { m, show_author }.to_string()
}
