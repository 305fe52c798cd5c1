//! HTTP handlers: JSON API, public pages, admin dashboard, crawler endpoints.

pub mod admin;
pub mod contact;
pub mod page_content;
pub mod pages;
pub mod resource;
pub mod seo;
