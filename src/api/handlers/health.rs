//! Handler for the liveness endpoint.

use axum::Json;

use crate::api::dto::envelope::Envelope;

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /healths/`
///
/// Touches no storage, so it answers even when the database is down.
pub async fn health_handler() -> Json<Envelope> {
    Json(Envelope::message("Service is alive"))
}
