//! Test utilities and common setup.

use std::path::Path;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use axum::response::Response;
use corkboard::api::{AppState, create_router};
use corkboard::config::BoardConfig;
use corkboard::db::Database;
use corkboard::message::{MessageRepository, models, repository};
use tower::ServiceExt;

/// Board settings used by the tests: small pages, fixed site URL.
pub fn test_board() -> BoardConfig {
    BoardConfig {
        title: "Testboard".to_string(),
        site_url: "http://testboard.example".to_string(),
        page_size: 10,
        one_line_page_size: 100,
    }
}

/// Create an in-memory database.
pub async fn test_db() -> Database {
    Database::in_memory().await.expect("in-memory database")
}

/// Create a test application over the given database.
pub fn test_app(db: &Database) -> Router {
    let state = AppState::new(db, test_board());
    create_router(state, Path::new("static"))
}

/// Repository over the test database.
pub fn repo(db: &Database) -> MessageRepository {
    MessageRepository::new(db.pool().clone())
}

/// Insert a message directly, with an explicit publication timestamp so
/// tests control the ordering.
pub async fn seed_message(
    db: &Database,
    id: &str,
    author_id: &str,
    source: &str,
    published: &str,
    reply_to: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO messages (id, author_id, title, source, html, published, reply_to) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(author_id)
    .bind(models::derive_title(source))
    .bind(source)
    .bind(repository::render_markdown(source))
    .bind(published)
    .bind(reply_to)
    .execute(db.pool())
    .await
    .expect("seeding message");
}

/// Seed the standard fixture: 25 messages by two authors, 15 head posts
/// and 10 replies, with strictly increasing timestamps.
pub async fn seed_board(db: &Database) {
    for i in 0..15 {
        let author = if i % 3 == 0 { "bob" } else { "ada" };
        seed_message(
            db,
            &format!("head-{i:02}"),
            author,
            &format!("head post {i}"),
            &format!("2024-05-01T10:00:{i:02}"),
            None,
        )
        .await;
    }
    for i in 0..10 {
        seed_message(
            db,
            &format!("reply-{i:02}"),
            "ada",
            &format!("reply {i}"),
            &format!("2024-05-01T11:00:{i:02}"),
            Some(&format!("head-{:02}", i % 15)),
        )
        .await;
    }
}

/// Drive a GET request through the router and return the response.
pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method(Method::GET)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Drive a form POST through the router and return the response.
pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method(Method::POST)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
