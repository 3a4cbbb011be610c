//! DTOs for the redirect endpoint.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Short;

/// JSON body returned instead of a redirect when the client asks for JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub id: Uuid,
    pub url: String,
}

impl From<Short> for RedirectTarget {
    fn from(short: Short) -> Self {
        Self {
            id: short.id,
            url: short.url,
        }
    }
}
