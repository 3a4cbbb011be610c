//! Cross-origin resource sharing middleware.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::CorsConfig;

/// Builds the CORS layer from configuration.
///
/// A `*` entry allows any origin, method or header. Browsers reject a
/// wildcard response together with credentials, so when credentials are
/// enabled wildcards mirror the request instead.
///
/// Entries that are not valid header values or methods are skipped with a
/// warning.
pub fn layer(config: &CorsConfig) -> CorsLayer {
    let origin = if is_wildcard(&config.origins) {
        if config.credentials {
            AllowOrigin::mirror_request()
        } else {
            Any.into()
        }
    } else {
        AllowOrigin::list(parse_all(&config.origins, |o| HeaderValue::from_str(o).ok()))
    };

    let methods = if is_wildcard(&config.methods) {
        if config.credentials {
            AllowMethods::mirror_request()
        } else {
            Any.into()
        }
    } else {
        AllowMethods::list(parse_all(&config.methods, |m| {
            Method::from_bytes(m.as_bytes()).ok()
        }))
    };

    let headers = if is_wildcard(&config.headers) {
        if config.credentials {
            AllowHeaders::mirror_request()
        } else {
            Any.into()
        }
    } else {
        AllowHeaders::list(parse_all(&config.headers, |h| HeaderName::try_from(h).ok()))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.credentials)
        .max_age(Duration::from_secs(config.max_age))
}

fn is_wildcard(items: &[String]) -> bool {
    items.iter().any(|item| item == "*")
}

fn parse_all<T>(items: &[String], parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| {
            let parsed = parse(item);
            if parsed.is_none() {
                tracing::warn!("Ignoring invalid CORS entry '{}'", item);
            }
            parsed
        })
        .collect()
}
