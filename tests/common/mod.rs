#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use shorter::config::CorsConfig;
use shorter::infrastructure::persistence::InMemoryShortRepository;
use shorter::routes::app_router;
use shorter::state::AppState;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(InMemoryShortRepository::new()))
}

/// Full application router over fresh in-memory storage.
pub fn create_test_server() -> TestServer {
    create_test_server_with_cors(CorsConfig::default())
}

/// Same as [`create_test_server`] with a custom CORS policy.
pub fn create_test_server_with_cors(cors: CorsConfig) -> TestServer {
    let app = app_router(create_test_state(), &cors);

    // The path normalizer wraps the router, so mount it as a fallback service
    TestServer::new(Router::new().fallback_service(app)).unwrap()
}

/// Serves `router` behind the same trailing-slash normalization as the app.
pub fn serve(router: Router) -> TestServer {
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);
    TestServer::new(Router::new().fallback_service(app)).unwrap()
}

/// Creates a short link through the API and returns its JSON record.
pub async fn create_short(server: &TestServer, url: &str, code: Option<&str>) -> Value {
    let mut body = json!({ "url": url });
    if let Some(code) = code {
        body["code"] = json!(code);
    }

    let response = server.post("/short/").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["content"][0].clone()
}

pub fn first_message(body: &Value) -> &str {
    body["detail"][0]["msg"].as_str().unwrap()
}
