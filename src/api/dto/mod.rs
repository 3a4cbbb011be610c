//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization and `validator` for input
//! validation. Every response body is wrapped in [`envelope::Envelope`].

pub mod envelope;
pub mod redirect;
pub mod short;
