//! Handler for short code redirects.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::api::dto::envelope::Envelope;
use crate::api::dto::redirect::RedirectTarget;
use crate::api::handlers::shorts::validate_code;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a short code to its original URL.
///
/// # Endpoint
///
/// `GET /redirects/{code}`
///
/// # Content Negotiation
///
/// - `Accept: application/json` → 200 envelope with `{id, url}`
/// - anything else → 307 Temporary Redirect to the stored URL
///
/// Deactivated and expired links still resolve.
///
/// # Errors
///
/// - **404 Not Found**: the code doesn't exist
/// - **422 Unprocessable Entity**: the code has a bad length
pub async fn redirect_handler(
    State(state): State<AppState>,
    code: Result<Path<String>, PathRejection>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Path(code) = code?;
    validate_code(&code)?;

    let short = state.short_service.get_by_code(&code).await?;

    if wants_json(&headers) {
        debug!(code = %short.code, "Returning original URL as JSON");
        let target = RedirectTarget::from(short);
        return Ok(Json(Envelope::ok("Original URL received", vec![target])).into_response());
    }

    debug!(code = %short.code, url = %short.url, "Redirecting");
    Ok(Redirect::temporary(&short.url).into_response())
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("application/json"))
}
