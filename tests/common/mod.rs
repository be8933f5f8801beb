// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::Response;
use axum::Router;
use soulcare::config::{ClientConfig, Config};
use soulcare::db::MemoryStore;
use soulcare::middleware::auth::create_jwt;
use soulcare::routes::create_router;
use soulcare::AppState;
use std::sync::Arc;

/// Create a test app backed by a freshly seeded store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        store: MemoryStore::seeded(),
    });

    (create_router(state.clone()), state)
}

/// Bearer token for `user_id`, signed with the test key.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str) -> String {
    create_jwt(user_id, &Config::test_default().jwt_signing_key).expect("Failed to create JWT")
}

/// Serve `app` on an ephemeral loopback port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind loopback listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Client config pointing at `base_url`, with simulated latency off.
#[allow(dead_code)]
pub fn client_config(base_url: &str) -> ClientConfig {
    ClientConfig::test_default().with_base_url(base_url)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
