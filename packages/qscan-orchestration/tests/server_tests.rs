//! HTTP layer tests: routing in-process, plus one real socket round trip

mod common;

use bytes::Bytes;
use common::*;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use qscan_orchestration::{AnalysisServer, AppState, ServerConfig, ServiceConfig};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;

fn state(language: &'static str, max_body_bytes: usize) -> AppState {
    AppState::new(
        Arc::new(orchestrator(language, MockTranslator::new(MockReply::Code(IS_PRIME)))),
        max_body_bytes,
    )
}

async fn send(state: &AppState, method: Method, path: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap();

    let response = state.handle(request).await;
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&state("js", 1024), Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_analysis_success_shape() {
    let payload = serde_json::json!({ "code": IS_PRIME }).to_string();
    let (status, body) = send(&state("js", 1 << 20), Method::POST, "/code-analysis", &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["detectedLanguage"], "js");
    assert_eq!(body["conversionRequired"], false);
    assert_eq!(body["shorPotential"], true);
    assert_eq!(body["groverPotential"], false);
    assert_eq!(body["potentialFindings"], serde_json::json!([]));
    assert_eq!(body["costEstimates"][0]["algorithm"], "Combined (Shor)");
    assert!(body["score"].as_u64().unwrap() <= 99);
}

#[tokio::test]
async fn test_missing_code_is_too_short() {
    for payload in ["{}", r#"{"code": null}"#, r#"{"code": "short"}"#] {
        let (status, body) = send(&state("js", 1024), Method::POST, "/code-analysis", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "No code provided or code too short for analysis (min 20 chars)"
        );
        assert!(body.get("detectedLanguage").is_none());
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let (status, body) = send(&state("js", 1024), Method::POST, "/code-analysis", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");

    let (status, _) = send(&state("js", 1024), Method::POST, "/code-analysis", r#"{"code": 42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversize_body() {
    let payload = serde_json::json!({ "code": "x".repeat(500) }).to_string();
    let (status, body) = send(&state("js", 64), Method::POST, "/code-analysis", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn test_routing_errors() {
    let (status, _) = send(&state("js", 1024), Method::GET, "/code-analysis", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, body) = send(&state("js", 1024), Method::GET, "/nope", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_syntax_error_body() {
    let payload = serde_json::json!({ "code": "function f() { return 'unterminated; }" }).to_string();
    let (status, body) = send(&state("js", 1024), Method::POST, "/code-analysis", &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JavaScript syntax");
    assert_eq!(body["detectedLanguage"], "js");
    assert!(body["details"].as_str().unwrap().contains("line 1"));
}

#[tokio::test]
async fn test_server_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let config = ServerConfig {
        bind_address: addr.to_string(),
        ..ServerConfig::default()
    };
    let orch = Arc::new(orchestrator("js", MockTranslator::new(MockReply::Fail)));
    let server = AnalysisServer::new(orch, &config).unwrap();
    assert_eq!(server.bind_address(), addr);
    tokio::spawn(server.serve(listener));

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/code-analysis", addr))
        .json(&serde_json::json!({ "code": "function search(arr,x){ return arr.find(v => v === x); }" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["potentialFindings"],
        serde_json::json!(["Potential array search method (.find) in function: search (line 1)"])
    );
}

#[test]
fn test_bundled_example_config_parses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/service.yaml");
    assert_eq!(ServiceConfig::from_yaml(path).unwrap(), ServiceConfig::default());
}
