//! Repository trait definitions for the domain layer.
//!
//! [`Repository`] is the generic CRUD contract; [`ShortRepository`] binds it
//! to the short link entity. Implementations live in
//! `crate::infrastructure::persistence`, mocks are generated with `mockall`
//! for tests.
//!
//! # Testing
//!
//! See `tests/repository_short.rs` for the PostgreSQL contract tests.

pub mod repository;
pub mod short_repository;

pub use repository::Repository;
pub use short_repository::ShortRepository;

#[cfg(test)]
pub use short_repository::MockShortRepository;
