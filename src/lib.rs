//! Hafriyat site: public marketing pages and a JSON content API for an earthmoving company, on PostgreSQL.

pub mod app;
pub mod case;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod resources;
pub mod response;
pub mod routes;
pub mod seo;
pub mod service;
pub mod slug;
pub mod sql;
pub mod state;
pub mod store;

pub use app::create_app;
pub use config::Config;
pub use contact::{ContactNotifier, TelegramNotifier};
pub use error::AppError;
pub use response::{success_many, success_one};
pub use service::CrudService;
pub use slug::slugify;
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables, Db};
