//! Core domain entities.
//!
//! The service stores a single entity, [`Short`], with separate structs for
//! creation ([`NewShort`]), partial updates ([`ShortPatch`]) and single-field
//! lookups ([`ShortFilter`]).

pub mod short;

pub use short::{MAX_CODE_LENGTH, NewShort, Short, ShortFilter, ShortPatch};
