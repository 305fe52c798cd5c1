//! Request extractors and guards.

pub mod admin;
pub mod json;

pub use admin::{require_admin_for_writes, AdminToken};
pub use json::JsonBody;
