mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use textboard_api::auth::generate_identity_token;
use textboard_api::workspace::{issue_workspace_token, WorkspaceRole};

// The authorization pipeline short-circuits before the repository, so none
// of these require a reachable database.

#[tokio::test]
async fn missing_identity_is_unauthenticated() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/call/getTexts", server.base_url))
        .json(&json!({ "workspaceToken": "whatever" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    Ok(())
}

#[tokio::test]
async fn invalid_identity_is_unauthenticated() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/call/getTexts", server.base_url))
        .bearer_auth("not-a-valid-token")
        .json(&json!({ "workspaceToken": "whatever" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_reported_before_workspace_check() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let identity = generate_identity_token("tester")?;

    let res = client
        .post(format!("{}/call/createText", server.base_url))
        .bearer_auth(&identity)
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(
        body["error"]["message"],
        "Missing required fields: workspaceToken, content"
    );
    Ok(())
}

#[tokio::test]
async fn garbage_workspace_token_is_invalid_workspace() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let identity = generate_identity_token("tester")?;

    let res = client
        .post(format!("{}/call/getTexts", server.base_url))
        .bearer_auth(&identity)
        .json(&json!({ "workspaceToken": "garbage" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["code"], "INVALID_WORKSPACE");
    Ok(())
}

#[tokio::test]
async fn foreign_workspace_token_is_invalid_workspace() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let identity = generate_identity_token("tester")?;
    // Token issued to someone else
    let stolen = issue_workspace_token("ws-auth", "other-user", WorkspaceRole::Admin)?;

    let res = client
        .post(format!("{}/call/getTexts", server.base_url))
        .bearer_auth(&identity)
        .json(&json!({ "workspaceToken": stolen }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["code"], "INVALID_WORKSPACE");
    Ok(())
}

#[tokio::test]
async fn viewer_role_is_forbidden_for_editor_operations() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let identity = generate_identity_token("tester")?;
    let viewer = issue_workspace_token("ws-auth", "tester", WorkspaceRole::Viewer)?;

    let res = client
        .post(format!("{}/call/getTexts", server.base_url))
        .bearer_auth(&identity)
        .json(&json!({ "workspaceToken": viewer }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    Ok(())
}
