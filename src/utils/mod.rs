//! Helper functions used across the application.
//!
//! - [`url_normalizer`] - Destination URL validation and canonical form
//! - [`db_error`] - Storage error classification

pub mod db_error;
pub mod url_normalizer;
