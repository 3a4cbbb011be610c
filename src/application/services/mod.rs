//! Business logic services for the application layer.

pub mod code_service;
pub mod short_service;

pub use code_service::{CodeGenerator, CodeService};
pub use short_service::ShortService;
