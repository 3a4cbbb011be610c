//! API route configuration.

use crate::api::handlers::{
    create_short_handler, delete_all_shorts_handler, delete_short_handler, health_handler,
    list_shorts_handler, lookup_short_handler, redirect_handler, update_short_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /healths`          - Liveness check
/// - `POST   /short`            - Create a short link
/// - `GET    /short`            - List short links (`?limit=N`)
/// - `DELETE /short`            - Delete all short links
/// - `GET    /short/lookup`     - Look up by `id` or `code` header
/// - `PUT    /short/{id}`       - Partially update a short link
/// - `DELETE /short/{id}`       - Delete a short link
/// - `GET    /redirects/{code}` - Redirect, or JSON with `Accept: application/json`
///
/// Paths are matched without a trailing slash; the top-level router trims it.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/healths", get(health_handler))
        .route(
            "/short",
            post(create_short_handler)
                .get(list_shorts_handler)
                .delete(delete_all_shorts_handler),
        )
        .route("/short/lookup", get(lookup_short_handler))
        .route(
            "/short/{id}",
            put(update_short_handler).delete(delete_short_handler),
        )
        .route("/redirects/{code}", get(redirect_handler))
}
