mod common;

use std::time::Duration;

use anyhow::Result;

use textboard_api::client::{
    CommentQueries, CreateCommentRequest, CreateTextRequest, QueryCache, TextQueries,
};
use textboard_api::config;
use textboard_api::database::Database;

// Comment flows, including the documented boundary values and the
// orphan-tolerant behavior on text deletion. Skip without a database.

#[tokio::test]
async fn comment_flow_and_filtering() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping comment_flow_and_filtering: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let workspace = format!("ws-comments-{}", common::unique_suffix());
    let api = common::secured_client(&server.base_url, "tester", &workspace)?;
    let texts = TextQueries::new(api.clone(), QueryCache::new());
    let comments = CommentQueries::new(api.clone(), QueryCache::new());

    let text = texts
        .create(
            &workspace,
            CreateTextRequest {
                title: None,
                content: "Hello".to_string(),
            },
        )
        .await?;

    let comment = comments
        .create(
            &workspace,
            CreateCommentRequest {
                text_id: text.id.clone(),
                content: "Nice".to_string(),
                author: "Alice".to_string(),
            },
        )
        .await?;
    assert_eq!(comment.workspace_id, workspace);
    assert_eq!(comment.text_id, text.id);

    let for_text = comments.list(&workspace, Some(&text.id)).await?;
    assert_eq!(for_text.len(), 1);
    assert_eq!(for_text[0].author, "Alice");
    assert_eq!(for_text[0].content, "Nice");

    // Second comment lands first in the listing
    tokio::time::sleep(Duration::from_millis(50)).await;
    let second = comments
        .create(
            &workspace,
            CreateCommentRequest {
                text_id: text.id.clone(),
                content: "Me too".to_string(),
                author: "Bob".to_string(),
            },
        )
        .await?;

    let for_text = comments.list(&workspace, Some(&text.id)).await?;
    assert_eq!(for_text.len(), 2);
    assert_eq!(for_text[0].id, second.id);
    assert_eq!(for_text[1].id, comment.id);

    // Aggregates straight from the repository
    let db = Database::connect(&config::config().database)?;
    assert_eq!(db.comments().count_by_text(&workspace, &text.id).await?, 2);
    assert_eq!(db.comments().count(&workspace).await?, 2);
    assert_eq!(db.texts().count(&workspace).await?, 1);

    // Delete distinguishes not-found from success
    assert!(comments.delete(&workspace, &second.id).await?);
    let err = comments.delete(&workspace, &second.id).await.unwrap_err();
    assert_eq!(err.code(), Some("NOT_FOUND"));

    Ok(())
}

#[tokio::test]
async fn comment_length_boundaries() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping comment_length_boundaries: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let workspace = format!("ws-bounds-{}", common::unique_suffix());
    let api = common::secured_client(&server.base_url, "tester", &workspace)?;
    let comments = CommentQueries::new(api.clone(), QueryCache::new());

    // Exactly at the limits is accepted
    let ok = comments
        .create(
            &workspace,
            CreateCommentRequest {
                text_id: "text-1".to_string(),
                content: "x".repeat(500),
                author: "a".repeat(100),
            },
        )
        .await?;
    assert_eq!(ok.content.chars().count(), 500);

    // One past either limit is rejected
    let err = comments
        .create(
            &workspace,
            CreateCommentRequest {
                text_id: "text-1".to_string(),
                content: "x".repeat(501),
                author: "Alice".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("INVALID_INPUT"));

    let err = comments
        .create(
            &workspace,
            CreateCommentRequest {
                text_id: "text-1".to_string(),
                content: "fine".to_string(),
                author: "a".repeat(101),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("INVALID_INPUT"));

    Ok(())
}

#[tokio::test]
async fn deleting_text_leaves_orphaned_comments() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping deleting_text_leaves_orphaned_comments: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let workspace = format!("ws-orphan-{}", common::unique_suffix());
    let api = common::secured_client(&server.base_url, "tester", &workspace)?;
    let texts = TextQueries::new(api.clone(), QueryCache::new());
    let comments = CommentQueries::new(api.clone(), QueryCache::new());

    let text = texts
        .create(
            &workspace,
            CreateTextRequest {
                title: None,
                content: "doomed".to_string(),
            },
        )
        .await?;
    comments
        .create(
            &workspace,
            CreateCommentRequest {
                text_id: text.id.clone(),
                content: "will outlive the text".to_string(),
                author: "Alice".to_string(),
            },
        )
        .await?;

    assert!(texts.delete(&workspace, &text.id).await?);

    // No cascade: the comment still resolves under its text_id
    let orphans = comments.list(&workspace, Some(&text.id)).await?;
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].content, "will outlive the text");

    Ok(())
}
