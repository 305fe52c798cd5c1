//! Contact form submission handler.

use crate::contact::ContactRequest;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

/// POST /api/contact: validate and forward to the configured bot.
pub async fn submit(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    request.validate()?;
    let notifier = state
        .notifier
        .as_ref()
        .ok_or(AppError::NotConfigured("contact bot"))?;
    notifier.notify(&request.to_message(&state.config.site.name)).await?;
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}
