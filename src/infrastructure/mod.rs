//! Infrastructure layer implementing the domain repository contracts.
//!
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod persistence;
