//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations used by the
//! HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::short_service::ShortService`] - Short link creation, lookup, update and deletion
//! - [`services::code_service::CodeService`] - Unique random code generation

pub mod services;
