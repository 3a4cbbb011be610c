//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/healths`          - Liveness check
//! - `/short/*`          - Short link management
//! - `/redirects/{code}` - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Cross-origin policy from configuration
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::config::CorsConfig;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_config` - cross-origin policy applied to every route
pub fn app_router(state: AppState, cors_config: &CorsConfig) -> NormalizePath<Router> {
    let router = api::routes::routes()
        .with_state(state)
        .layer(cors::layer(cors_config))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
