//! Common routes: health, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
    contact_bot: bool,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// 503 while the database is unconfigured or unreachable.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let contact_bot = state.notifier.is_some();
    let database = match state.db.pool() {
        None => "unconfigured",
        Some(pool) => match sqlx::query("SELECT 1").fetch_optional(pool).await {
            Ok(_) => "ok",
            Err(e) => {
                tracing::warn!(error = %e, "readiness probe failed");
                "unavailable"
            }
        },
    };
    let (code, status) = if database == "ok" {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        code,
        Json(ReadyBody {
            status,
            database,
            contact_bot,
        }),
    )
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
