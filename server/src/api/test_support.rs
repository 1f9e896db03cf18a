//! In-process HTTP helpers for handler tests.

use crate::{AppContext, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use flavor_core::ai::FakeAiClient;
use flavor_core::{MemoryRecipeStore, Recipe, RecipeStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// A router wired to an in-memory store and a fake AI client, both kept
/// around so tests can inspect them.
pub struct TestApp {
    pub store: Arc<MemoryRecipeStore>,
    pub client: Arc<FakeAiClient>,
    state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_client(FakeAiClient::default())
    }

    pub fn with_client(client: FakeAiClient) -> Self {
        let store = Arc::new(MemoryRecipeStore::new());
        let client = Arc::new(client);
        let state = Arc::new(AppContext {
            store: store.clone(),
            ai_client: client.clone(),
        });
        Self {
            store,
            client,
            state,
        }
    }

    pub fn router(&self) -> Router {
        super::router().with_state(self.state.clone())
    }

    pub fn seed(&self, title: &str, ingredients: &[&str], instructions: &str) {
        self.store
            .append(Recipe::new(title, ingredients.iter().copied(), instructions));
    }

    /// Send a JSON-typed request with an arbitrary body.
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        execute(self.router(), request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed body, or `Value::Null` when the body is empty or not JSON.
    pub json: Value,
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    execute(app, builder.body(body).unwrap()).await
}

async fn execute(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        json,
    }
}
