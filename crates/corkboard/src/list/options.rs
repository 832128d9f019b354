//! Formatting options for message lists.
//!
//! Four display toggles carried in the URL query string. The marker
//! parameter `x` tells a first visit (no form submitted, use defaults)
//! apart from an explicit submission with every toggle cleared.

use std::collections::HashMap;

/// Marker key present whenever the options form was submitted.
const MARKER_KEY: &str = "x";

/// Per-request display toggles for a message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingOptions {
    /// Show one-line summaries instead of full messages.
    pub one_line: bool,
    /// Show head posts only.
    pub head_only: bool,
    /// Most recent posts first.
    pub mrf: bool,
    /// Auto-update the page by polling for newer messages.
    pub au: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            one_line: false,
            head_only: true,
            mrf: true,
            au: false,
        }
    }
}

impl FormattingOptions {
    /// Parse from query parameters. Without the marker key the defaults are
    /// returned unchanged; with it, each flag is on iff its key carries a
    /// non-empty value.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        if !flag(params, MARKER_KEY) {
            return Self::default();
        }

        Self {
            one_line: flag(params, "oneLine"),
            head_only: flag(params, "headOnly"),
            mrf: flag(params, "mrf"),
            au: flag(params, "au"),
        }
    }

    /// Query pairs that reproduce these options in a link, marker included.
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = vec![(MARKER_KEY, "1")];
        if self.one_line {
            pairs.push(("oneLine", "1"));
        }
        if self.head_only {
            pairs.push(("headOnly", "1"));
        }
        if self.mrf {
            pairs.push(("mrf", "1"));
        }
        if self.au {
            pairs.push(("au", "1"));
        }
        pairs
    }
}

fn flag(params: &HashMap<String, String>, key: &str) -> bool {
    params.get(key).is_some_and(|v| !v.is_empty())
}
