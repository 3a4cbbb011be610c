//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod shorts;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorts::{
    create_short_handler, delete_all_shorts_handler, delete_short_handler, list_shorts_handler,
    lookup_short_handler, update_short_handler,
};
