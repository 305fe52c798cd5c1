//! Public HTML pages, admin dashboard, and crawler files.

use crate::handlers::{admin, pages, seo};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn page_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/hizmetler", get(pages::services))
        .route("/hizmetler/:slug", get(pages::service))
        .route("/projeler", get(pages::projects))
        .route("/projeler/:slug", get(pages::project))
        .route("/bolgeler", get(pages::regions))
        .route("/bolgeler/:slug", get(pages::region))
        .route("/blog", get(pages::blog))
        .route("/blog/:slug", get(pages::post))
        .route("/hakkimizda", get(pages::about))
        .route("/iletisim", get(pages::contact))
        .route("/admin", get(admin::dashboard))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .with_state(state)
}
