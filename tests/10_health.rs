mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/health", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/api/teachers", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn seeded_tenant_can_create_and_list() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();
    let token = server.token(common::SMOKE_TENANT);

    let res = client
        .post(format!("{}/api/teachers", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "first_name": "Ana", "last_name": "Lee", "subject": "Math" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/api/teachers", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body["success"].as_bool().unwrap_or(false), "success flag false or missing: {}", body);
    let teachers = body["data"]["teachers"].as_array().expect("teachers array");
    assert!(teachers.iter().any(|t| t["last_name"] == "Lee"));
    Ok(())
}

#[tokio::test]
async fn dropping_the_handle_stops_the_server() -> Result<()> {
    let server = common::spawn_server().await?;
    let url = format!("{}/health", server.base_url);
    drop(server);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()?;
    assert!(client.get(&url).send().await.is_err(), "server still answering on {url}");
    Ok(())
}
