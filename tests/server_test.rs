use anyhow::Result;
use grant_match::app::server::router;
use grant_match::{FunctionConfig, GrantFunction};
use httpmock::prelude::*;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;

async fn spawn_server(config: FunctionConfig) -> Result<SocketAddr> {
    let function = Arc::new(GrantFunction::new(config)?);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, router(function)).await.ok();
    });

    Ok(addr)
}

#[tokio::test]
async fn test_preflight_over_http() -> Result<()> {
    let addr = spawn_server(FunctionConfig::default()).await?;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("http://{}/ai-grants", addr))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    assert_eq!(response.text().await?, "ok");
    Ok(())
}

#[tokio::test]
async fn test_get_is_method_not_allowed_with_cors() -> Result<()> {
    let addr = spawn_server(FunctionConfig::default()).await?;

    let response = reqwest::get(format!("http://{}/", addr)).await?;

    assert_eq!(response.status(), 405);
    assert!(response.headers().contains_key("access-control-allow-methods"));
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body, json!({ "error": "Method not allowed" }));
    Ok(())
}

#[tokio::test]
async fn test_post_match_over_http() -> Result<()> {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-1.5-flash:generateContent");
        then.status(200).json_body(json!({
            "candidates": [{ "content": { "parts": [{ "text": "rural, broadband" }] } }]
        }));
    });
    upstream.mock(|when, then| {
        when.method(GET).path("/rest/v1/grants");
        then.status(200).json_body(json!([
            { "title": "Rural Broadband Fund", "description": "Connectivity",
              "organization": "Connect Trust", "tags": ["internet"] },
            { "title": "Arts Council Grant", "description": "Theatre",
              "organization": "Arts Council", "tags": ["arts"] }
        ]));
    });

    let addr = spawn_server(FunctionConfig {
        catalog_url: Some(upstream.base_url()),
        service_role_key: Some("service-key".to_string()),
        ai_api_key: Some("ai-key".to_string()),
        ai_base_url: upstream.base_url(),
        ..FunctionConfig::default()
    })
    .await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/ai-grants", addr))
        .json(&json!({ "query": "internet for rural towns" }))
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body["message"],
        "Top matching grants:\n- Rural Broadband Fund (Connect Trust)"
    );
    assert_eq!(body["grants"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_large_query_reaches_function_with_cors() -> Result<()> {
    let addr = spawn_server(FunctionConfig::default()).await?;
    let query = "solar ".repeat(500_000);

    let response = reqwest::Client::new()
        .post(format!("http://{}/ai-grants", addr))
        .json(&json!({ "query": query }))
        .send()
        .await?;

    // 沒有請求大小限制：由函式本身回覆（此處因缺少 AI 金鑰回 500）
    assert_eq!(response.status(), 500);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body, json!({ "error": "AI API key not set" }));
    Ok(())
}
