#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use token_shortener::domain::entities::{Link, NewLink, NewUser, User};
use token_shortener::domain::repositories::{LinkRepository, UserRepository};
use token_shortener::error::AppError;
use token_shortener::infrastructure::memory::{MemoryLinkRepository, MemoryUserRepository};
use token_shortener::routes::router;
use token_shortener::state::AppState;

pub const BASE_URL: &str = "http://short.test";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// Application wired to memory stores, with handles to both stores.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub users: Arc<MemoryUserRepository>,
    pub links: Arc<MemoryLinkRepository>,
}

pub fn create_test_state(
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
) -> AppState {
    AppState::with_settings(
        users,
        links,
        SIGNING_SECRET.to_string(),
        7,
        BASE_URL.to_string(),
    )
}

pub fn create_test_app() -> TestApp {
    let users = Arc::new(MemoryUserRepository::new());
    let links = Arc::new(MemoryLinkRepository::new());
    let state = create_test_state(users.clone(), links.clone());
    let server = TestServer::new(router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        users,
        links,
    }
}

/// Server over a working user store and the given link store.
pub fn create_server_with_links(links: Arc<dyn LinkRepository>) -> TestServer {
    let state = create_test_state(Arc::new(MemoryUserRepository::new()), links);
    TestServer::new(router(state)).unwrap()
}

/// Asserts a 500 store failure with the given public message and no leaked cause.
pub fn assert_store_failure(response: &TestResponse, message: &str) {
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["error"], message);
    assert_eq!(body["code"], "store_error");
    assert!(!body.to_string().contains("connection refused"));
}

/// Registers a user over HTTP and returns the issued token.
pub async fn register(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/register")
        .json(&json!({ "name": name, "email": format!("{name}@example.com") }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Shortens a URL over HTTP and returns the response body.
pub async fn shorten(server: &TestServer, token: &str, url: &str) -> Value {
    let response = server
        .post("/shorten")
        .add_header("x-api-key", token)
        .json(&json!({ "long_url": url }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()
}

/// Moves a user's token expiry into the past.
pub async fn expire_token(app: &TestApp, token: &str) {
    let user = app
        .state
        .token_service
        .validate(Some(token))
        .await
        .unwrap();
    let past: DateTime<Utc> = Utc::now() - chrono::Duration::seconds(1);

    app.users
        .replace_token(user.id, &user.token_hash, &user.token_hash, past)
        .await
        .unwrap()
        .unwrap();
}

/// Link store whose every call fails like an unreachable database.
pub struct FailingLinkRepository;

fn unreachable_store() -> AppError {
    AppError::store(std::io::Error::other("connection refused"))
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Link>, AppError> {
        Err(unreachable_store())
    }

    async fn increment_clicks(&self, _id: &str) -> Result<Option<Link>, AppError> {
        Err(unreachable_store())
    }

    async fn list_by_owner(&self, _owner_id: i64) -> Result<Vec<Link>, AppError> {
        Err(unreachable_store())
    }

    async fn update(
        &self,
        _id: &str,
        _original_url: &str,
        _title: &str,
    ) -> Result<Option<Link>, AppError> {
        Err(unreachable_store())
    }

    async fn delete(&self, _id: &str) -> Result<bool, AppError> {
        Err(unreachable_store())
    }

    async fn totals(&self) -> Result<(i64, i64), AppError> {
        Err(unreachable_store())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable_store())
    }
}

/// User store whose every call fails like an unreachable database.
pub struct FailingUserRepository;

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn create(&self, _new_user: NewUser) -> Result<User, AppError> {
        Err(unreachable_store())
    }

    async fn find_by_token_hash(&self, _token_hash: &str) -> Result<Option<User>, AppError> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, AppError> {
        Err(unreachable_store())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Err(unreachable_store())
    }

    async fn replace_token(
        &self,
        _id: i64,
        _current_hash: &str,
        _new_hash: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<Option<User>, AppError> {
        Err(unreachable_store())
    }
}
