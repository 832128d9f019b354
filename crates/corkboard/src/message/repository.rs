//! Message database repository.

use anyhow::{Context, Result};
use comrak::{Options, markdown_to_html};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::{self, Message, NewMessage};
use super::query::{MessageFilter, SortOrder};

/// All message columns for SELECT queries.
const MESSAGE_COLUMNS: &str = "id, author_id, title, source, html, published, reply_to";

/// Repository for message persistence.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: SqlitePool,
}

impl MessageRepository {
    /// Create a new repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Count messages matching the filter.
    pub async fn count(&self, filter: &MessageFilter) -> Result<i64> {
        let (clause, binds) = filter.where_clause();
        let query = format!("SELECT COUNT(*) FROM messages {}", clause);

        let mut q = sqlx::query_as::<_, (i64,)>(&query);
        for bind in &binds {
            q = q.bind(bind);
        }
        let count = q
            .fetch_one(&self.pool)
            .await
            .context("counting messages")?;

        Ok(count.0)
    }

    /// Fetch messages matching the filter, sorted by publication time,
    /// bounded by `limit` and optionally offset by `skip`.
    pub async fn find(
        &self,
        filter: &MessageFilter,
        order: SortOrder,
        skip: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Message>> {
        let (clause, binds) = filter.where_clause();
        let mut query = format!(
            "SELECT {} FROM messages {} ORDER BY published {} LIMIT {}",
            MESSAGE_COLUMNS,
            clause,
            order.sql(),
            limit
        );
        if let Some(skip) = skip {
            query.push_str(&format!(" OFFSET {}", skip));
        }

        let mut q = sqlx::query_as::<_, Message>(&query);
        for bind in &binds {
            q = q.bind(bind);
        }
        let messages = q.fetch_all(&self.pool).await.context("fetching messages")?;

        Ok(messages)
    }

    /// Fetch the first message matching the filter in the given order.
    pub async fn find_one(
        &self,
        filter: &MessageFilter,
        order: SortOrder,
    ) -> Result<Option<Message>> {
        let (clause, binds) = filter.where_clause();
        let query = format!(
            "SELECT {} FROM messages {} ORDER BY published {} LIMIT 1",
            MESSAGE_COLUMNS,
            clause,
            order.sql()
        );

        let mut q = sqlx::query_as::<_, Message>(&query);
        for bind in &binds {
            q = q.bind(bind);
        }
        let message = q
            .fetch_optional(&self.pool)
            .await
            .context("fetching message")?;

        Ok(message)
    }

    /// Get a message by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Message>> {
        let query = format!("SELECT {} FROM messages WHERE id = ?", MESSAGE_COLUMNS);
        let message = sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("fetching message by ID")?;

        Ok(message)
    }

    /// Persist a new message, stamping its id and publication time and
    /// rendering its Markdown source.
    pub async fn save(&self, new: NewMessage) -> Result<Message> {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            author_id: new.author_id,
            title: models::derive_title(&new.source),
            html: render_markdown(&new.source),
            source: new.source,
            published: models::published_now(),
            reply_to: new.reply_to,
        };

        sqlx::query(
            "INSERT INTO messages (id, author_id, title, source, html, published, reply_to) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&message.id)
        .bind(&message.author_id)
        .bind(&message.title)
        .bind(&message.source)
        .bind(&message.html)
        .bind(&message.published)
        .bind(&message.reply_to)
        .execute(&self.pool)
        .await
        .context("saving message")?;

        Ok(message)
    }
}

/// Render a message's Markdown source to HTML.
pub fn render_markdown(source: &str) -> String {
    markdown_to_html(source, &Options::default())
}
