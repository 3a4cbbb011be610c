//! Short link entity mapping a short code to a destination URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum length of a short code, matching the `VARCHAR(6)` column.
pub const MAX_CODE_LENGTH: usize = 6;

/// A stored short link.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Short {
    pub id: Uuid,
    pub code: String,
    pub url: String,
    pub is_activated: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl Short {
    /// Returns true if the link has passed its expiry time.
    ///
    /// Informational only: redirects do not consult it.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for creating a new short link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShort {
    pub code: String,
    pub url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update for an existing short link.
///
/// `None` fields are left unchanged.
/// `expires_at: Some(None)` clears the expiry; `Some(Some(t))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortPatch {
    pub code: Option<String>,
    pub url: Option<String>,
    pub is_activated: Option<bool>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl ShortPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.url.is_none()
            && self.is_activated.is_none()
            && self.expires_at.is_none()
    }

    /// Applies the patch in place and bumps `last_updated_at`.
    pub fn apply(self, short: &mut Short) {
        if let Some(code) = self.code {
            short.code = code;
        }
        if let Some(url) = self.url {
            short.url = url;
        }
        if let Some(is_activated) = self.is_activated {
            short.is_activated = is_activated;
        }
        if let Some(expires_at) = self.expires_at {
            short.expires_at = expires_at;
        }
        short.last_updated_at = Utc::now();
    }
}

/// Equality predicate on a single short link field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortFilter {
    Id(Uuid),
    Code(String),
}

impl ShortFilter {
    /// True when `short` satisfies the predicate.
    pub fn matches(&self, short: &Short) -> bool {
        match self {
            ShortFilter::Id(id) => short.id == *id,
            ShortFilter::Code(code) => short.code == *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Short {
        let now = Utc::now();
        Short {
            id: Uuid::new_v4(),
            code: "abc123".to_string(),
            url: "https://example.com/".to_string(),
            is_activated: true,
            expires_at: None,
            created_at: now,
            last_updated_at: now,
        }
    }

    #[test]
    fn test_is_expired() {
        let mut short = sample();
        assert!(!short.is_expired());

        short.expires_at = Some(Utc::now() - Duration::seconds(1));
        assert!(short.is_expired());

        short.expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(!short.is_expired());
    }

    #[test]
    fn test_empty_patch() {
        assert!(ShortPatch::default().is_empty());

        let clear_expiry = ShortPatch {
            expires_at: Some(None),
            ..Default::default()
        };
        assert!(!clear_expiry.is_empty());
    }

    #[test]
    fn test_apply_patch() {
        let mut short = sample();
        short.expires_at = Some(Utc::now());
        let before = short.last_updated_at;

        ShortPatch {
            code: Some("xyz".to_string()),
            is_activated: Some(false),
            expires_at: Some(None),
            ..Default::default()
        }
        .apply(&mut short);

        assert_eq!(short.code, "xyz");
        assert_eq!(short.url, "https://example.com/");
        assert!(!short.is_activated);
        assert!(short.expires_at.is_none());
        assert!(short.last_updated_at >= before);
    }

    #[test]
    fn test_filter_matches() {
        let short = sample();

        assert!(ShortFilter::Id(short.id).matches(&short));
        assert!(ShortFilter::Code("abc123".to_string()).matches(&short));
        assert!(!ShortFilter::Code("other".to_string()).matches(&short));
        assert!(!ShortFilter::Id(Uuid::new_v4()).matches(&short));
    }
}
