#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use todo_api::app::build_router;
use todo_api::config::{AppEnv, Config, DEFAULT_SQIDS_ALPHABET, StoreKind};
use todo_api::repos::MemoryTodoRepo;
use todo_api::services::auth::{AuthService, TokenSigner};
use todo_api::services::id_codec::IdCodec;
use todo_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        store: StoreKind::Memory,
        database_url: None,
        database_max_connections: 1,
        sqids_min_length: 10,
        sqids_alphabet: DEFAULT_SQIDS_ALPHABET.to_string(),
        jwt_secret: SECRET.to_string(),
        access_token_leeway_seconds: 0,
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: MemoryTodoRepo,
    pub signer: TokenSigner,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let repo = MemoryTodoRepo::new();

        let state = AppState::new(
            Arc::new(repo.clone()),
            IdCodec::new(config.sqids_min_length, &config.sqids_alphabet).unwrap(),
            Arc::new(AuthService::new(SECRET.as_bytes(), 0)),
        );

        Self {
            router: build_router(state, &config),
            repo,
            signer: TokenSigner::new(SECRET.as_bytes(), 600),
        }
    }

    pub fn token(&self, sub: &str) -> String {
        self.signer.sign(sub).unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    /// POST /add as `sub`, returning the created todo.
    pub async fn add(&self, sub: &str, task: &str, due: &str) -> Value {
        let token = self.token(sub);
        let (status, body) = self
            .send(
                Method::POST,
                "/add",
                Some(&token),
                Some(serde_json::json!({ "task": task, "dueDate": due })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
        body
    }

    pub async fn list(&self, sub: &str) -> Vec<Value> {
        let token = self.token(sub);
        let (status, body) = self.send(Method::GET, "/get", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
        body.as_array().cloned().unwrap()
    }
}
