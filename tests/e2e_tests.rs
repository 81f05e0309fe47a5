//! End-to-end HTTP tests against a spawned server.

mod common;

use clausewatch::gateway::{STATUS_HEADER, STATUS_READY};
use serde_json::{Value, json};

use common::collaborators::Counters;
use common::fixtures::{LONG_POLICY, small_chunks, test_checklist};
use common::harness::{TestServerConfig, spawn_test_server};

async fn analyze(base: &str, url: &str, text: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/analyze"))
        .json(&json!({ "url": url, "text": text }))
        .send()
        .await
        .expect("request should be sent")
}

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let response = reqwest::get(format!("{}/healthz", server.url()))
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_endpoint_reports_stub_collaborators() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let response = reqwest::get(format!("{}/ready", server.url()))
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(STATUS_HEADER).unwrap(),
        STATUS_READY
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["components"]["embedder"], "stub");
    assert_eq!(body["components"]["reranker"], "stub");
    assert_eq!(body["components"]["concerns"], 3);
}

#[tokio::test]
async fn test_analyze_then_cache_hit() {
    let checklist = test_checklist();
    let server = spawn_test_server(TestServerConfig {
        pipeline: small_chunks(),
        counters: Some(Counters::answering(&checklist, &[0])),
        checklist,
    })
    .await
    .expect("Server should start");

    let first = analyze(&server.url(), "https://example.com/terms", LONG_POLICY).await;
    assert_eq!(first.status(), 200);
    let first: Value = first.json().await.unwrap();
    assert_eq!(first["safety_score"], 85);

    let second = analyze(&server.url(), "https://mirror.example/terms", LONG_POLICY).await;
    let second: Value = second.json().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(server.counters.generator.calls(), 1);
    assert!(server.storage.path().read_dir().unwrap().next().is_some());
}

#[tokio::test]
async fn test_analyze_short_text() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");

    let response = analyze(&server.url(), "https://example.com", "tiny").await;
    let body: Value = response.json().await.unwrap();

    assert_eq!(
        body,
        json!({ "safety_score": 0, "analysis": { "Error": "Text too short." } })
    );
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let server = spawn_test_server(TestServerConfig {
        counters: Some(Counters::new(
            clausewatch::generation::MockGenerator::failing("provider unreachable"),
        )),
        ..Default::default()
    })
    .await
    .expect("Server should start");

    let response = analyze(&server.url(), "https://example.com", LONG_POLICY).await;
    assert_eq!(response.status(), 500);

    let body: Value = response.json().await.unwrap();
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .contains("provider unreachable")
    );
}

#[tokio::test]
async fn test_concurrent_requests() {
    let server = spawn_test_server(TestServerConfig {
        pipeline: small_chunks(),
        ..Default::default()
    })
    .await
    .expect("Server should start");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let base = server.url();
            tokio::spawn(async move {
                let text = format!("Revision {i}.\n\n{LONG_POLICY}");
                analyze(&base, "https://example.com", &text).await.status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.expect("task should not panic"), 200);
    }
    assert_eq!(server.counters.generator.calls(), 8);
}
