//! JSON API under `/api`. Catalog resources resolve from the first path segment;
//! `page-content` and `contact` are fixed routes and win over the generic ones.

use crate::extractors::require_admin_for_writes;
use crate::handlers::{contact, page_content, resource};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    let content = Router::new()
        .route("/page-content", get(page_content::list).post(page_content::upsert))
        .route("/page-content/:id", delete(page_content::delete))
        .route("/:path_segment", get(resource::list).post(resource::create))
        .route(
            "/:path_segment/:id",
            get(resource::read)
                .put(resource::update)
                .patch(resource::update)
                .delete(resource::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_for_writes));
    Router::new()
        .route("/contact", post(contact::submit))
        .merge(content)
        .with_state(state)
}
