//! DTOs for the short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Short, ShortPatch};

/// Request body for `POST /short/`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortRequest {
    /// Custom short code (1-6 chars). Generated when absent.
    #[validate(length(min = 1, max = 6, message = "must be 1-6 characters"))]
    pub code: Option<String>,

    /// Original URL to shorten (must include http/https).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional expiration timestamp (UTC).
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request body for `PUT /short/{id}`.
///
/// All fields are optional and unknown fields are rejected.
///
/// # `expires_at` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear expiry
/// - **Timestamp** → set new expiry
///
/// `null` for any other field is treated as absent.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateShortRequest {
    pub is_activated: Option<bool>,

    #[validate(length(min = 1, max = 6, message = "must be 1-6 characters"))]
    pub code: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateShortRequest> for ShortPatch {
    fn from(request: UpdateShortRequest) -> Self {
        Self {
            code: request.code,
            url: request.url,
            is_activated: request.is_activated,
            expires_at: request.expires_at,
        }
    }
}

/// Query parameters for `GET /short/`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<i64>,
}

/// JSON representation of a stored short link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortResponse {
    pub id: Uuid,
    pub code: String,
    pub url: String,
    pub is_activated: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl From<Short> for ShortResponse {
    fn from(short: Short) -> Self {
        Self {
            id: short.id,
            code: short.code,
            url: short.url,
            is_activated: short.is_activated,
            expires_at: short.expires_at,
            created_at: short.created_at,
            last_updated_at: short.last_updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_validation() {
        let ok: CreateShortRequest =
            serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();
        assert!(ok.validate().is_ok());

        let long_code: CreateShortRequest =
            serde_json::from_value(json!({ "url": "https://example.com", "code": "1234567" }))
                .unwrap();
        assert!(long_code.validate().is_err());

        let empty_code: CreateShortRequest =
            serde_json::from_value(json!({ "url": "https://example.com", "code": "" })).unwrap();
        assert!(empty_code.validate().is_err());

        let bad_url: CreateShortRequest =
            serde_json::from_value(json!({ "url": "not a url" })).unwrap();
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_update_request_expires_at_states() {
        let absent: UpdateShortRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.expires_at, None);
        assert!(ShortPatch::from(absent).is_empty());

        let cleared: UpdateShortRequest =
            serde_json::from_value(json!({ "expires_at": null })).unwrap();
        assert_eq!(cleared.expires_at, Some(None));

        let set: UpdateShortRequest =
            serde_json::from_value(json!({ "expires_at": "2099-12-31T23:59:59Z" })).unwrap();
        assert!(matches!(set.expires_at, Some(Some(_))));
    }

    #[test]
    fn test_update_request_null_code_is_absent() {
        let request: UpdateShortRequest = serde_json::from_value(json!({ "code": null })).unwrap();
        assert!(ShortPatch::from(request).is_empty());
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let result = serde_json::from_value::<UpdateShortRequest>(json!({ "id": "x" }));
        assert!(result.is_err());
    }
}
