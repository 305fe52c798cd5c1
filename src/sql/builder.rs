//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a catalog resource.

use crate::resources::{Column, Resource};
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for PostgreSQL (safe: only from the catalog).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }

    /// Push a value and return its placeholder cast to the column type.
    fn push_for(&mut self, column: &Column, v: Value) -> String {
        let n = self.push_param(v);
        format!("${}::{}", n, column.kind.pg_type())
    }
}

/// Hard cap on list page size.
pub const MAX_LIMIT: u32 = 1000;

/// `"id", <catalog columns>, "created_at", "updated_at"`.
fn select_column_list(resource: &Resource) -> String {
    std::iter::once("id")
        .chain(resource.columns.iter().map(|c| c.name))
        .chain(["created_at", "updated_at"])
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

fn where_clause(parts: &[String]) -> String {
    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

fn visibility_part(resource: &Resource, visible_only: bool) -> Option<String> {
    resource
        .visibility_column
        .filter(|_| visible_only)
        .map(|c| format!("{} = TRUE", quoted(c)))
}

/// SELECT list with exact-match filters, optional visibility filter, catalog ordering, LIMIT/OFFSET.
/// Filters naming columns outside the catalog are ignored.
pub fn select_list(
    resource: &Resource,
    filters: &[(String, Value)],
    visible_only: bool,
    limit: Option<u32>,
    offset: Option<u32>,
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::new();
    for (col, val) in filters {
        if let Some(column) = resource.column(col) {
            let ph = q.push_for(column, val.clone());
            where_parts.push(format!("{} = {}", quoted(col), ph));
        }
    }
    where_parts.extend(visibility_part(resource, visible_only));

    let limit_clause = limit.map(|n| format!(" LIMIT {}", n.min(MAX_LIMIT))).unwrap_or_default();
    let offset_clause = offset.map(|n| format!(" OFFSET {}", n)).unwrap_or_default();
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}{}{}",
        select_column_list(resource),
        quoted(resource.table),
        where_clause(&where_parts),
        resource.order_by,
        limit_clause,
        offset_clause
    );
    q
}

/// SELECT by primary key. Caller binds the id as sole param.
pub fn select_by_id(resource: &Resource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = $1::integer",
        select_column_list(resource),
        quoted(resource.table)
    );
    q
}

/// SELECT one row by a unique text column (the slug), optionally only when visible.
pub fn select_by_column(resource: &Resource, column: &Column, value: Value, visible_only: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_for(column, value);
    let mut parts = vec![format!("{} = {}", quoted(column.name), ph)];
    parts.extend(visibility_part(resource, visible_only));
    q.sql = format!(
        "SELECT {} FROM {}{} LIMIT 1",
        select_column_list(resource),
        quoted(resource.table),
        where_clause(&parts)
    );
    q
}

pub fn count(resource: &Resource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(resource.table));
    q
}

/// INSERT the catalog columns present in body; absent ones fall back to DB defaults or NULL.
pub fn insert(resource: &Resource, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in resource.columns {
        let Some(val) = body.get(c.name) else { continue };
        placeholders.push(q.push_for(c, val.clone()));
        cols.push(quoted(c.name));
    }
    let returning = select_column_list(resource);
    q.sql = if cols.is_empty() {
        format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(resource.table),
            returning
        )
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(resource.table),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only catalog columns present in body, always bumping updated_at.
pub fn update(resource: &Resource, id: i64, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in resource.columns {
        let Some(val) = body.get(c.name) else { continue };
        let rhs = q.push_for(c, val.clone());
        sets.push(format!("{} = {}", quoted(c.name), rhs));
    }
    sets.push(format!("{} = NOW()", quoted("updated_at")));
    let id_param = q.push_param(Value::from(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${}::integer RETURNING {}",
        quoted(resource.table),
        sets.join(", "),
        id_param,
        select_column_list(resource)
    );
    q
}

/// DELETE by id. Caller binds the id as sole param.
pub fn delete(resource: &Resource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE \"id\" = $1::integer RETURNING {}",
        quoted(resource.table),
        select_column_list(resource)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{BLOG_POSTS, COMPANY_STATS, PROJECTS, SERVICES};
    use serde_json::json;

    fn body(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn list_visible_with_filter() {
        let q = select_list(
            &PROJECTS,
            &[("category".into(), json!("yol")), ("bogus".into(), json!(1))],
            true,
            Some(5000),
            Some(10),
        );
        assert!(q.sql.starts_with("SELECT \"id\", \"title\""));
        assert!(q.sql.contains("FROM \"projects\" WHERE \"category\" = $1::text AND \"is_active\" = TRUE"));
        assert!(q.sql.contains("ORDER BY \"display_order\" ASC, \"id\" DESC LIMIT 1000 OFFSET 10"));
        assert_eq!(q.params, vec![json!("yol")]);
    }

    #[test]
    fn list_without_visibility_column_ignores_flag() {
        let q = select_list(&COMPANY_STATS, &[], true, None, None);
        assert!(!q.sql.contains("WHERE"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn by_slug_filters_visibility() {
        let slug = BLOG_POSTS.column("slug").unwrap();
        let q = select_by_column(&BLOG_POSTS, slug, json!("ilk-yazi"), true);
        assert!(q.sql.contains("WHERE \"slug\" = $1::text AND \"is_published\" = TRUE LIMIT 1"));
        assert_eq!(q.params, vec![json!("ilk-yazi")]);
    }

    #[test]
    fn insert_only_present_catalog_columns() {
        let b = body(&[
            ("title", json!("Kazı")),
            ("slug", json!("kazi")),
            ("features", json!(["a"])),
            ("unknown", json!("x")),
        ]);
        let q = insert(&SERVICES, &b);
        assert!(q.sql.starts_with(
            "INSERT INTO \"services\" (\"title\", \"slug\", \"features\") VALUES ($1::text, $2::text, $3::jsonb) RETURNING"
        ));
        assert_eq!(q.params, vec![json!("Kazı"), json!("kazi"), json!(["a"])]);
    }

    #[test]
    fn insert_empty_body_uses_defaults() {
        let q = insert(&COMPANY_STATS, &HashMap::new());
        assert!(q.sql.starts_with("INSERT INTO \"company_stats\" DEFAULT VALUES"));
    }

    #[test]
    fn update_binds_id_last_and_touches_updated_at() {
        let b = body(&[("is_active", json!(false))]);
        let q = update(&SERVICES, 42, &b);
        assert!(q.sql.contains("SET \"is_active\" = $1::boolean, \"updated_at\" = NOW() WHERE \"id\" = $2::integer"));
        assert_eq!(q.params, vec![json!(false), json!(42)]);
    }

    #[test]
    fn delete_returns_row() {
        let q = delete(&SERVICES);
        assert!(q.sql.starts_with("DELETE FROM \"services\" WHERE \"id\" = $1::integer RETURNING \"id\""));
    }
}
