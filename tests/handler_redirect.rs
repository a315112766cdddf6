mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;
use token_shortener::infrastructure::memory::MemoryUserRepository;
use token_shortener::routes::router;

#[tokio::test]
async fn test_redirect_success() {
    let app = common::create_test_app();
    let token = common::register(&app.server, "alice").await;
    let link = common::shorten(&app.server, &token, "https://example.com/target").await;
    let id = link["id"].as_str().unwrap();

    let response = app.server.get(&format!("/{id}")).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = common::create_test_app();

    let response = app.server.get("/missing1").await;

    response.assert_status_not_found();
    let body = response.json::<Value>();
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["error"], "Link not found");
}

#[tokio::test]
async fn test_redirect_needs_no_token() {
    let app = common::create_test_app();
    let token = common::register(&app.server, "alice").await;
    let link = common::shorten(&app.server, &token, "https://example.com").await;

    app.server
        .get(&format!("/{}", link["id"].as_str().unwrap()))
        .add_header("x-api-key", "garbage")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_each_redirect_counts_one_click() {
    let app = common::create_test_app();
    let token = common::register(&app.server, "alice").await;
    let link = common::shorten(&app.server, &token, "https://example.com").await;
    let id = link["id"].as_str().unwrap();

    for _ in 0..3 {
        let response = app.server.get(&format!("/{id}")).await;
        assert_eq!(response.header("location"), "https://example.com");
    }

    let stats = app
        .server
        .get(&format!("/stats/{id}"))
        .add_header("x-api-key", token.as_str())
        .await
        .json::<Value>();

    assert_eq!(stats["clicks"], 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolves_count_every_click() {
    let app = common::create_test_app();
    let token = common::register(&app.server, "alice").await;
    let link = common::shorten(&app.server, &token, "https://example.com").await;
    let id = link["id"].as_str().unwrap().to_string();

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let service = app.state.link_service.clone();
            let id = id.clone();
            tokio::spawn(async move { service.resolve(&id).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com");
    }

    let stats = app
        .server
        .get(&format!("/stats/{id}"))
        .add_header("x-api-key", token.as_str())
        .await
        .json::<Value>();

    assert_eq!(stats["clicks"], 100);
}

#[tokio::test]
async fn test_redirect_store_failure_hides_cause() {
    let state = common::create_test_state(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(common::FailingLinkRepository),
    );
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/abcd1234").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Failed to resolve link");
    assert_eq!(body["code"], "store_error");
    assert!(!body.to_string().contains("connection refused"));
}
