//! Domain layer containing the business entity and data access contracts.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the HTTP or infrastructure layers;
//! repository traits are implemented in `crate::infrastructure::persistence`.

pub mod entities;
pub mod repositories;
