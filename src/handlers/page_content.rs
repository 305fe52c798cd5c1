//! Page content API: list by page, upsert by (page, section, key), delete by id.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::handlers::resource::parse_id;
use crate::response::{success_many, success_one_ok};
use crate::service::page_content::{self, PageContentInput};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct PageFilter {
    pub page: Option<String>,
}

/// GET /api/page-content?page=home: rows for one page, or all rows.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<PageFilter>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = filter.page.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let rows = page_content::list(&state.db, page).await?;
    Ok(success_many(rows))
}

/// POST /api/page-content: set value (upsert).
pub async fn upsert(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PageContentInput>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    input.validate()?;
    let row = page_content::upsert(&state.db, &input).await?;
    tracing::info!(page = %input.page, section = %input.section, key = %input.key, "page content saved");
    Ok(success_one_ok(row))
}

/// DELETE /api/page-content/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = page_content::delete(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("page content not found: {}", id)))?;
    Ok(success_one_ok(row))
}
