//! Repository implementations and database plumbing.
//!
//! - [`PgShortRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryShortRepository`] - process-local storage for development and tests
//! - [`pool`] - connection pool setup and migrations

pub mod memory_short_repository;
pub mod pg_short_repository;
pub mod pool;

pub use memory_short_repository::InMemoryShortRepository;
pub use pg_short_repository::PgShortRepository;
