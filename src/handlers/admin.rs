//! Admin dashboard: row counts per content table and links to their JSON endpoints.

use crate::error::AppError;
use crate::extractors::AdminToken;
use crate::handlers::pages::{HtmlTemplate, Layout};
use crate::resources;
use crate::service::{page_content, CrudService};
use crate::state::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

pub(crate) struct ResourceCount {
    pub label: &'static str,
    pub count: i64,
    pub endpoint: String,
}

#[derive(Template)]
#[template(path = "admin.html")]
struct AdminTemplate {
    layout: Layout,
    database_ready: bool,
    counts: Vec<ResourceCount>,
}

pub async fn dashboard(State(state): State<AppState>, token: AdminToken) -> Result<Response, AppError> {
    token.authorize(state.config.admin_token.as_deref())?;
    let mut counts = Vec::with_capacity(resources::ALL.len() + 1);
    for r in resources::ALL {
        counts.push(ResourceCount {
            label: r.label,
            count: CrudService::count(&state.db, r).await?,
            endpoint: format!("/api/{}", r.path_segment),
        });
    }
    counts.push(ResourceCount {
        label: "Sayfa İçerikleri",
        count: page_content::count(&state.db).await?,
        endpoint: "/api/page-content".to_string(),
    });
    let layout = Layout::new(&state.config.site, Some("Yönetim"), None, "/admin", &[]);
    Ok(HtmlTemplate(AdminTemplate {
        layout,
        database_ready: state.db.is_configured(),
        counts,
    })
    .into_response())
}
