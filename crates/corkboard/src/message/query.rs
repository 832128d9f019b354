//! Message query filters.
//!
//! A `MessageFilter` is the typed form of the document query the original
//! board built dynamically: a base filter per page (all messages, one
//! author) plus the clauses implied by the formatting options.

use crate::list::options::FormattingOptions;

/// Fetch order over the `published` timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first.
    Descending,
    /// Oldest first.
    Ascending,
}

impl SortOrder {
    /// The SQL keyword for this order.
    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Descending => "DESC",
            SortOrder::Ascending => "ASC",
        }
    }
}

impl From<&FormattingOptions> for SortOrder {
    fn from(options: &FormattingOptions) -> Self {
        if options.mrf {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// Filter over the messages table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    /// Match a single author.
    pub author_id: Option<String>,
    /// Match replies to a single parent message.
    pub reply_to: Option<String>,
    /// Restrict to head posts (no reply-to reference).
    pub head_only: bool,
}

impl MessageFilter {
    /// Merge this base filter with the formatting options, returning a new
    /// filter. The base is never mutated.
    pub fn with_options(&self, options: &FormattingOptions) -> MessageFilter {
        let mut merged = self.clone();
        if options.head_only {
            merged.head_only = true;
        }
        merged
    }

    /// Compile to a SQL WHERE clause and its bind values. Returns an empty
    /// clause when the filter matches everything.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(author_id) = &self.author_id {
            conditions.push("author_id = ?".to_string());
            binds.push(author_id.clone());
        }
        if let Some(reply_to) = &self.reply_to {
            conditions.push("reply_to = ?".to_string());
            binds.push(reply_to.clone());
        }
        if self.head_only {
            conditions.push("(reply_to IS NULL OR reply_to = '')".to_string());
        }

        if conditions.is_empty() {
            (String::new(), binds)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), binds)
        }
    }
}
