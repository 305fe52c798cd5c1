//! CrudService: generic CRUD using the safe SQL builder, plus page content and request validation.

mod crud;
pub mod page_content;
mod validation;
pub use crud::{CrudService, ListQuery, DEFAULT_LIMIT};
pub use validation::{fits_integer, is_date, is_timestamp, matches_format, RequestValidator};
