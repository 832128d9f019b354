//! API integration tests.

use axum::http::StatusCode;
use corkboard::message::MessageFilter;
use serde_json::Value;

mod common;
use common::{body_string, get, post_form, repo, seed_board, seed_message, test_app, test_db};

/// Health endpoint responds without any setup.
#[tokio::test]
async fn test_health_endpoint() {
    let db = test_db().await;
    let app = test_app(&db);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: Value = serde_json::from_slice(
        &axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

/// The root redirects to the message list.
#[tokio::test]
async fn test_root_redirects_to_list() {
    let db = test_db().await;
    let app = test_app(&db);

    let response = get(&app, "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/messList");
}

/// Default list view: head posts only, first page of 10 out of 15.
#[tokio::test]
async fn test_mess_list_default_pagination() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/messList").await).await;

    assert!(body.contains("Displaying messages 0-10 of 15."));
    assert_eq!(body.matches("<div class='mess' id=").count(), 10);
    // Head posts only; no reply message bodies on the page.
    assert!(!body.contains("reply 0"));
    // Second page link carries the options and the skip offset.
    assert!(body.contains("skip=10"));
}

/// With the marker present and all toggles cleared, replies are included.
#[tokio::test]
async fn test_mess_list_all_posts() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/messList?x=1").await).await;
    assert!(body.contains("Displaying messages 0-10 of 25."));
}

/// A stale bookmarked skip clamps to the last page instead of failing.
#[tokio::test]
async fn test_mess_list_skip_clamps() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/messList?skip=1000").await).await;
    assert!(body.contains("Displaying messages 10-15 of 15."));
}

/// One-line view renders summaries, not full messages.
#[tokio::test]
async fn test_mess_list_one_line() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/messList?x=1&oneLine=1&headOnly=1").await).await;
    assert_eq!(body.matches("<div class='mess-oneline'>").count(), 15);
    assert_eq!(body.matches("<div class='mess' id=").count(), 0);
    // The board-wide list names authors in one-line view.
    assert!(body.contains("/blog/ada"));
}

/// Auto-update views are not paginated and carry the polling script.
#[tokio::test]
async fn test_auto_update_view() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/messList?x=1&au=1&mrf=1&headOnly=1").await).await;
    assert!(body.contains("updatePollUrl"));
    assert!(body.contains("/au/messList"));
    assert!(body.contains("2024-05-01T10:00:14"));
    assert!(!body.contains("Displaying messages"));
}

/// Without most-recent-first the polling script is not emitted.
#[tokio::test]
async fn test_auto_update_requires_mrf() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/messList?x=1&au=1&headOnly=1").await).await;
    assert!(!body.contains("updatePollUrl"));
    // Still unpaginated: auto-update alone disables the window.
    assert!(!body.contains("Displaying messages"));
}

/// The poll endpoint reports the newest timestamp under the page filter.
#[tokio::test]
async fn test_au_poll_endpoint() {
    let db = test_db().await;
    let app = test_app(&db);

    // Empty board: the sentinel, which sorts before any real timestamp.
    let body = body_string(get(&app, "/au/messList").await).await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ts"], "2000-01-01T00:00:00");

    seed_board(&db).await;

    // Default options are head-only, so the newest head post wins.
    let body = body_string(get(&app, "/au/messList").await).await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ts"], "2024-05-01T10:00:14");

    // With all posts included the newest reply wins.
    let body = body_string(get(&app, "/au/messList?x=1").await).await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["ts"], "2024-05-01T11:00:09");
}

/// Blog pages filter to one author and omit the author in one-line view.
#[tokio::test]
async fn test_blog_page() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/blog/bob?x=1&oneLine=1").await).await;
    // bob wrote head posts 0, 3, 6, 9, 12 and no replies.
    assert_eq!(body.matches("<div class='mess-oneline'>").count(), 5);
    // The author column is omitted on a single-author page.
    assert!(!body.contains("/blog/bob'>bob</a>"));
}

/// Single message view and source view.
#[tokio::test]
async fn test_mess_and_source_views() {
    let db = test_db().await;
    seed_message(
        &db,
        "m1",
        "ada",
        "hello *board*",
        "2024-05-01T10:00:00",
        None,
    )
    .await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/mess/m1").await).await;
    assert!(body.contains("<em>board</em>"));
    assert!(body.contains("/messRep/m1"));

    let body = body_string(get(&app, "/messSource/m1").await).await;
    assert!(body.contains("hello *board*"));

    let response = get(&app, "/mess/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// An empty submission re-renders the form and persists nothing.
#[tokio::test]
async fn test_reply_validation_failure() {
    let db = test_db().await;
    let app = test_app(&db);

    let response = post_form(&app, "/messRep", "message=&messRepButton=submit").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Your Message is required."));

    assert_eq!(repo(&db).count(&MessageFilter::default()).await.unwrap(), 0);
}

/// Preview renders the submitted text without persisting it.
#[tokio::test]
async fn test_reply_preview() {
    let db = test_db().await;
    let app = test_app(&db);

    let response = post_form(
        &app,
        "/messRep",
        "message=draft%20*text*&author=ada&messRepButton=preview",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("<em>text</em>"));
    // The form echoes the draft back for further editing.
    assert!(body.contains("draft *text*"));

    assert_eq!(repo(&db).count(&MessageFilter::default()).await.unwrap(), 0);
}

/// Submitting a reply persists one message linked to its parent and
/// redirects to the new message's view.
#[tokio::test]
async fn test_reply_submit() {
    let db = test_db().await;
    seed_message(&db, "parent", "ada", "head post", "2024-05-01T10:00:00", None).await;
    let app = test_app(&db);

    let response = post_form(
        &app,
        "/messRep/parent",
        "message=agreed&author=bob&messRepButton=submit",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response.headers()["location"].to_str().unwrap().to_string();
    assert!(location.starts_with("/mess/"));

    let repo = repo(&db);
    assert_eq!(repo.count(&MessageFilter::default()).await.unwrap(), 2);

    let new_id = location.trim_start_matches("/mess/");
    let message = repo.get(new_id).await.unwrap().unwrap();
    assert_eq!(message.reply_to.as_deref(), Some("parent"));
    assert_eq!(message.author_id, "bob");
    assert_eq!(message.source, "agreed");
}

/// A new head post persists without a parent.
#[tokio::test]
async fn test_new_post_submit() {
    let db = test_db().await;
    let app = test_app(&db);

    let response = post_form(&app, "/messRep", "message=first!&messRepButton=submit").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let repo = repo(&db);
    let messages = repo
        .find(
            &MessageFilter::default(),
            corkboard::message::SortOrder::Descending,
            None,
            10,
        )
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_head());
    // Blank author falls back to the default.
    assert_eq!(messages[0].author_id, "anon");
}

/// Replying to a missing message 404s.
#[tokio::test]
async fn test_reply_to_missing_parent() {
    let db = test_db().await;
    let app = test_app(&db);

    let response = get(&app, "/messRep/ghost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The feed serializes one item per message with feed content type.
#[tokio::test]
async fn test_rss_feed() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let response = get(&app, "/messList/rss").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("application/rss+xml")
    );

    let body = body_string(response).await;
    // Default options: head posts only, one page of 10.
    assert_eq!(body.matches("<item>").count(), 10);
    assert!(body.contains("<guid>http://testboard.example/mess/head-14</guid>"));
    assert!(body.contains("<title>Testboard</title>"));
}

/// The blog feed carries the author's channel metadata.
#[tokio::test]
async fn test_rss_blog_feed() {
    let db = test_db().await;
    seed_board(&db).await;
    let app = test_app(&db);

    let body = body_string(get(&app, "/blog/bob/rss").await).await;
    assert!(body.contains("<title>Testboard: bob</title>"));
    assert_eq!(body.matches("<item>").count(), 5);
}
