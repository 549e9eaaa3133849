mod common;

use std::time::Duration;

use anyhow::Result;
use serde_json::json;

use textboard_api::client::{CreateTextRequest, QueryCache, TextQueries, UpdateTextRequest};

// End-to-end CRUD flows; these need a configured database and skip cleanly
// without one.

#[tokio::test]
async fn text_crud_flow() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping text_crud_flow: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let workspace = format!("ws-texts-{}", common::unique_suffix());
    let api = common::secured_client(&server.base_url, "tester", &workspace)?;
    let texts = TextQueries::new(api.clone(), QueryCache::new());

    // Create without title
    let a = texts
        .create(
            &workspace,
            CreateTextRequest {
                title: None,
                content: "Hello".to_string(),
            },
        )
        .await?;
    assert!(!a.id.is_empty());
    assert_eq!(a.workspace_id, workspace);
    assert_eq!(a.title, None);
    assert_eq!(a.content, "Hello");
    assert_eq!(a.created_by, "tester");

    // Listing is newest first: after a second create, B precedes A
    tokio::time::sleep(Duration::from_millis(50)).await;
    let b = texts
        .create(
            &workspace,
            CreateTextRequest {
                title: Some("Second".to_string()),
                content: "World".to_string(),
            },
        )
        .await?;

    let listing = texts.list(&workspace).await?;
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, b.id);
    assert_eq!(listing[1].id, a.id);

    // Partial update touches only the provided field
    let updated = texts
        .update(
            &workspace,
            &a.id,
            UpdateTextRequest {
                title: Some("Titled".to_string()),
                content: None,
            },
        )
        .await?;
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.title.as_deref(), Some("Titled"));
    assert_eq!(updated.content, "Hello");
    assert!(updated.updated_at >= a.updated_at);

    // Empty update behaves as a no-op read
    let body = api
        .call_secured("updateText", &workspace, json!({ "textId": a.id.clone() }))
        .await?;
    assert_eq!(body["text"]["id"], a.id.as_str());
    assert_eq!(body["text"]["title"], "Titled");

    // Delete is idempotent by error, not by silent success
    assert!(texts.delete(&workspace, &b.id).await?);
    let err = texts.delete(&workspace, &b.id).await.unwrap_err();
    assert_eq!(err.code(), Some("NOT_FOUND"));

    Ok(())
}

#[tokio::test]
async fn workspace_isolation() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping workspace_isolation: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let suffix = common::unique_suffix();
    let ws_a = format!("ws-iso-a-{}", suffix);
    let ws_b = format!("ws-iso-b-{}", suffix);

    let api_a = common::secured_client(&server.base_url, "alice", &ws_a)?;
    let texts_a = TextQueries::new(api_a.clone(), QueryCache::new());
    let text = texts_a
        .create(
            &ws_a,
            CreateTextRequest {
                title: None,
                content: "private".to_string(),
            },
        )
        .await?;

    // A valid id is useless under another workspace's token
    let api_b = common::secured_client(&server.base_url, "alice", &ws_b)?;
    let texts_b = TextQueries::new(api_b.clone(), QueryCache::new());

    let err = texts_b.delete(&ws_b, &text.id).await.unwrap_err();
    assert_eq!(err.code(), Some("NOT_FOUND"));

    let listing = texts_b.list(&ws_b).await?;
    assert!(listing.iter().all(|t| t.id != text.id));

    // The text is untouched in its own workspace
    let listing = texts_a.list(&ws_a).await?;
    assert!(listing.iter().any(|t| t.id == text.id));

    Ok(())
}

#[tokio::test]
async fn workspace_id_comes_from_token_not_payload() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping workspace_id_comes_from_token_not_payload: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let workspace = format!("ws-spoof-{}", common::unique_suffix());
    let api = common::secured_client(&server.base_url, "tester", &workspace)?;

    // A caller-supplied workspace_id is ignored in favor of the token's
    let body = api
        .call_secured(
            "createText",
            &workspace,
            json!({ "content": "spoof attempt", "workspace_id": "someone-elses" }),
        )
        .await?;
    assert_eq!(body["text"]["workspace_id"], workspace.as_str());

    // Every success envelope carries refreshed credentials
    assert_eq!(body["workspace_tokens"][&workspace]["role"], "editor");
    assert!(body["workspace_tokens"][&workspace]["token"].is_string());

    Ok(())
}
