use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::database::models::{Account, Role};
use crate::database::MemoryStore;
use crate::middleware::IDENTITY_HEADER;
use crate::server;
use crate::state::AppState;

/// In-process router over a fresh memory store, driven with `oneshot`.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::from_store(MemoryStore::new())
    }

    /// Starts with one admin account already stored.
    pub fn with_admin(email: &str, password: &str) -> Self {
        let admin = Account::register(email, password).with_role(Role::Admin);
        Self::from_store(MemoryStore::with_accounts(vec![admin]))
    }

    /// Memory store under a non-development config.
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(MemoryStore::new(), config)
    }

    fn from_store(store: MemoryStore) -> Self {
        Self::build(store, AppConfig::development())
    }

    fn build(store: MemoryStore, config: AppConfig) -> Self {
        let state = AppState::new(Arc::new(store), config);
        Self {
            app: server::app(state),
        }
    }

    pub async fn get(&self, uri: &str, identity: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, identity, None, None).await
    }

    pub async fn post(&self, uri: &str, identity: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, identity, None, Some(body)).await
    }

    pub async fn put(&self, uri: &str, identity: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, identity, None, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, identity: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, identity, None, None).await
    }

    pub async fn put_with_token(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, None, Some(token), Some(body)).await
    }

    /// Registers an account and returns its id.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post("/register", None, json!({"email": email, "password": password}))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Creates a location owned by `email` and returns its id.
    pub async fn create_location(&self, email: &str, name: &str) -> String {
        let (status, body) = self
            .post(
                "/locations",
                Some(email),
                json!({
                    "name": name,
                    "category": "test",
                    "coordinates": {"lat": 1.5, "lng": 2.5},
                    "address": "Somewhere"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body["data"]["_id"].as_str().unwrap().to_string()
    }

    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post("/login", None, json!({"email": email, "password": password}))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        identity: Option<&str>,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(email) = identity {
            builder = builder.header(IDENTITY_HEADER, email);
        }
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}
