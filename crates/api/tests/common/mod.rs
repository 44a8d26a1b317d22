#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tms_api::auth::jwt::{generate_access_token, JwtConfig};
use tms_api::config::ServerConfig;
use tms_api::router::build_app_router;
use tms_api::state::AppState;
use tms_core::engine::TicketEngine;
use tms_core::memory::MemoryStore;
use tms_core::roles::Role;
use tms_core::ticket::UserSummary;
use tms_core::types::DbId;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults and a known JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The full application over an in-memory store.
///
/// `router` goes through the same middleware stack as production; `store`
/// gives tests direct access for seeding users and inspecting side effects.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        engine: TicketEngine::new(store.clone()),
        config: Arc::new(config.clone()),
    };
    TestApp {
        router: build_app_router(state),
        store,
        config,
    }
}

impl TestApp {
    /// Seed a user and mint a bearer token for them.
    pub fn user(&self, name: &str, role: Role) -> (DbId, String) {
        let id = DbId::now_v7();
        self.store
            .insert_user(UserSummary {
                id,
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                role,
            })
            .expect("seeding a user should succeed");
        let token = generate_access_token(id, role, &self.config.jwt)
            .expect("token generation should succeed");
        (id, token)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    /// Create a ticket as `token` and return its JSON.
    pub async fn create_ticket(
        &self,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> serde_json::Value {
        let response = self.post_json("/api/v1/tickets", token, body).await;
        assert_eq!(response.status(), axum::http::StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
