pub mod api;
pub mod common;
pub mod pages;

pub use api::api_routes;
pub use common::common_routes;
pub use pages::page_routes;
