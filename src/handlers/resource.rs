//! Catalog resource CRUD handlers: list, create, read, update, delete.

use crate::case::object_to_snake_map;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::resources::{self, ColumnKind, Resource};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{fits_integer, is_date, is_timestamp, CrudService, ListQuery, RequestValidator};
use crate::slug::ensure_slug;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use serde_json::Value;
use std::collections::HashMap;

fn resolve(path_segment: &str) -> Result<&'static Resource, AppError> {
    resources::by_path(path_segment).ok_or_else(|| AppError::NotFound(format!("unknown resource: {}", path_segment)))
}

pub(crate) fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0 && *n <= i32::MAX as i64)
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))
}

pub(crate) fn body_to_map(value: Value) -> Result<HashMap<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(object_to_snake_map(m)),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Query-string value typed for the column it filters. Unknown and JSON columns are skipped;
/// values the column cannot hold are a 400.
fn query_value_for_column(resource: &Resource, col: &str, s: &str) -> Result<Option<Value>, AppError> {
    let Some(column) = resource.column(col) else {
        return Ok(None);
    };
    let invalid = || AppError::Validation(format!("invalid filter value for {}", col));
    let value = match column.kind {
        ColumnKind::Integer => {
            let n = s.trim().parse::<i64>().ok().filter(|n| fits_integer(*n)).ok_or_else(invalid)?;
            Value::from(n)
        }
        ColumnKind::Boolean => match s {
            "true" | "1" => Value::Bool(true),
            "false" | "0" => Value::Bool(false),
            _ => return Err(invalid()),
        },
        ColumnKind::Json => return Ok(None),
        ColumnKind::Date if !is_date(s.trim()) => return Err(invalid()),
        ColumnKind::Timestamptz if !is_timestamp(s.trim()) => return Err(invalid()),
        ColumnKind::Date | ColumnKind::Timestamptz => Value::String(s.trim().to_string()),
        ColumnKind::Text => Value::String(s.to_string()),
    };
    Ok(Some(value))
}

/// Parse list params: `all`, `limit`, `offset`, and exact-match column filters.
fn list_query(resource: &Resource, params: HashMap<String, String>) -> Result<ListQuery, AppError> {
    let mut query = ListQuery::visible();
    for (k, v) in params {
        match k.as_str() {
            "all" => query.visible_only = !(v == "true" || v == "1"),
            "limit" => query.limit = v.parse().ok(),
            "offset" => query.offset = v.parse().ok(),
            _ => {
                if let Some(val) = query_value_for_column(resource, &k, &v)? {
                    query.filters.push((k, val));
                }
            }
        }
    }
    query.filters.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(query)
}

pub async fn list(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resolve(&path_segment)?;
    let query = list_query(resource, params)?;
    let rows = CrudService::list(&state.db, resource, &query).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Path(path_segment): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resolve(&path_segment)?;
    let mut body = body_to_map(body)?;
    if let Some(source) = resource.slug_source {
        ensure_slug(&mut body, source);
    }
    RequestValidator::validate(&mut body, resource)?;
    let row = CrudService::create(&state.db, resource, &body).await?;
    tracing::info!(resource = resource.table, id = ?row.get("id"), "created");
    Ok(success_one(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resolve(&path_segment)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::read(&state.db, resource, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(success_one_ok(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resolve(&path_segment)?;
    let id = parse_id(&id_str)?;
    let mut body = body_to_map(body)?;
    // slugs change only when sent explicitly
    if let (Some(source), true) = (resource.slug_source, body.contains_key("slug")) {
        ensure_slug(&mut body, source);
    }
    RequestValidator::validate_partial(&mut body, resource)?;
    let row = CrudService::update(&state.db, resource, id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    tracing::info!(resource = resource.table, id, "updated");
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((path_segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let resource = resolve(&path_segment)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::delete(&state.db, resource, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    tracing::info!(resource = resource.table, id, "deleted");
    Ok(success_one_ok(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::PROJECTS;

    #[test]
    fn parses_positive_ids_only() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(parse_id("0").is_err());
        assert!(parse_id("-1").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("99999999999").is_err());
    }

    #[test]
    fn list_params_become_typed_filters() {
        let params: HashMap<String, String> = [
            ("region_id", "4"),
            ("is_featured", "true"),
            ("category", "yol"),
            ("gallery", "x"),
            ("nope", "1"),
            ("limit", "6"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let q = list_query(&PROJECTS, params).unwrap();
        assert!(q.visible_only);
        assert_eq!(q.limit, Some(6));
        assert_eq!(
            q.filters,
            vec![
                ("category".to_string(), Value::from("yol")),
                ("is_featured".to_string(), Value::Bool(true)),
                ("region_id".to_string(), Value::from(4)),
            ]
        );
    }

    #[test]
    fn all_flag_includes_hidden_rows() {
        let params: HashMap<String, String> = [("all".to_string(), "true".to_string())].into_iter().collect();
        assert!(!list_query(&PROJECTS, params).unwrap().visible_only);
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn filters_the_column_cannot_hold_are_rejected() {
        assert!(list_query(&PROJECTS, params(&[("region_id", "99999999999")])).is_err());
        assert!(list_query(&PROJECTS, params(&[("completed_at", "abc")])).is_err());
        assert!(list_query(&PROJECTS, params(&[("is_featured", "belki")])).is_err());
        let q = list_query(&PROJECTS, params(&[("completed_at", "2024-05-01")])).unwrap();
        assert_eq!(q.filters, vec![("completed_at".to_string(), Value::from("2024-05-01"))]);
    }
}
