//! Handlers for short link management (create, list, lookup, update, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::envelope::Envelope;
use crate::api::dto::short::{CreateShortRequest, ListQuery, ShortResponse, UpdateShortRequest};
use crate::domain::entities::MAX_CODE_LENGTH;
use crate::error::AppError;
use crate::state::AppState;

type ShortEnvelope = Json<Envelope<ShortResponse>>;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /short/`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "code": "abc123",
///   "expires_at": "2099-12-31T23:59:59Z"
/// }
/// ```
///
/// `code` and `expires_at` are optional. Without `code` a random
/// 6-character alphanumeric code is generated.
///
/// # Errors
///
/// - **409 Conflict**: the supplied code is already taken
/// - **422 Unprocessable Entity**: malformed body, invalid URL or code length
pub async fn create_short_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateShortRequest>, JsonRejection>,
) -> Result<(StatusCode, ShortEnvelope), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let short = state
        .short_service
        .create_short(payload.url, payload.code, payload.expires_at)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Short URL created", vec![short.into()])),
    ))
}

/// Lists stored short links, oldest first.
///
/// # Endpoint
///
/// `GET /short/?limit=N`
///
/// # Errors
///
/// - **404 Not Found**: no short links exist
/// - **422 Unprocessable Entity**: `limit` is not a positive integer
pub async fn list_shorts_handler(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ShortEnvelope, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let shorts = state.short_service.list_shorts(query.limit).await?;

    Ok(Json(Envelope::ok(
        "Short URL received",
        shorts.into_iter().map(ShortResponse::from).collect(),
    )))
}

/// Looks up one short link by the `id` or `code` request header.
///
/// # Endpoint
///
/// `GET /short/lookup`
///
/// `id` takes precedence when both headers are sent.
///
/// # Errors
///
/// - **400 Bad Request**: neither header is present
/// - **404 Not Found**: no link matches
/// - **422 Unprocessable Entity**: `id` is not a UUID or `code` has a bad length
pub async fn lookup_short_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ShortEnvelope, AppError> {
    let id = header_value(&headers, "id")?
        .map(|raw| {
            Uuid::parse_str(raw.trim()).map_err(|_| AppError::validation("id: invalid UUID"))
        })
        .transpose()?;

    let code = header_value(&headers, "code")?
        .map(|raw| {
            let code = raw.trim();
            validate_code(code).map(|_| code.to_string())
        })
        .transpose()?;

    let short = state.short_service.lookup_short(id, code).await?;

    Ok(Json(Envelope::ok("Short URL received", vec![short.into()])))
}

/// Deletes every short link.
///
/// # Endpoint
///
/// `DELETE /short/`
///
/// # Errors
///
/// - **404 Not Found**: there was nothing to delete
pub async fn delete_all_shorts_handler(
    State(state): State<AppState>,
) -> Result<ShortEnvelope, AppError> {
    let deleted = state.short_service.delete_all_shorts().await?;

    Ok(Json(Envelope::ok(
        "Short URLs deleted",
        deleted.into_iter().map(ShortResponse::from).collect(),
    )))
}

/// Deletes one short link and returns its last state.
///
/// # Endpoint
///
/// `DELETE /short/{id}`
///
/// # Errors
///
/// - **404 Not Found**: no link has this id
/// - **422 Unprocessable Entity**: `id` is not a UUID
pub async fn delete_short_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ShortEnvelope, AppError> {
    let Path(id) = id?;

    let deleted = state.short_service.delete_short(id).await?;

    Ok(Json(Envelope::ok("Short URL deleted", vec![deleted.into()])))
}

/// Partially updates a short link.
///
/// # Endpoint
///
/// `PUT /short/{id}`
///
/// # Request Body
///
/// All fields are optional, but at least one must be present:
///
/// ```json
/// {
///   "is_activated": false,
///   "code": "new1",
///   "url": "https://example.org",
///   "expires_at": null
/// }
/// ```
///
/// `expires_at: null` clears the expiry.
///
/// # Errors
///
/// - **400 Bad Request**: no fields provided
/// - **404 Not Found**: no link has this id
/// - **409 Conflict**: the new code belongs to another link
/// - **422 Unprocessable Entity**: malformed body, unknown fields, invalid
///   URL or code length
pub async fn update_short_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateShortRequest>, JsonRejection>,
) -> Result<ShortEnvelope, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let updated = state.short_service.update_short(id, payload.into()).await?;

    Ok(Json(Envelope::ok("Short URL updated", vec![updated.into()])))
}

/// Checks that a code has between 1 and [`MAX_CODE_LENGTH`] characters.
pub(crate) fn validate_code(code: &str) -> Result<(), AppError> {
    let length = code.chars().count();
    if length == 0 || length > MAX_CODE_LENGTH {
        return Err(AppError::validation(format!(
            "code: must be 1-{MAX_CODE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, AppError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| AppError::validation(format!("{name}: invalid header value")))
        })
        .transpose()
}
