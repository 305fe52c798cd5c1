//! Generic CRUD execution against PostgreSQL for catalog resources.

use crate::error::AppError;
use crate::resources::Resource;
use crate::sql::{self, PgBindValue, QueryBuf};
use crate::store::Db;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: u32 = 100;

/// Options for list queries.
#[derive(Clone, Debug, Default)]
pub struct ListQuery {
    /// Exact-match filters; names outside the catalog are ignored.
    pub filters: Vec<(String, Value)>,
    /// Only rows whose visibility column is true.
    pub visible_only: bool,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ListQuery {
    pub fn visible() -> Self {
        ListQuery {
            visible_only: true,
            ..Default::default()
        }
    }

    pub fn all() -> Self {
        ListQuery::default()
    }

    pub fn filter(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }
}

pub struct CrudService;

impl CrudService {
    /// List rows. An unconfigured database yields an empty list.
    pub async fn list(db: &Db, resource: &Resource, query: &ListQuery) -> Result<Vec<Value>, AppError> {
        let Some(pool) = db.pool() else {
            return Ok(Vec::new());
        };
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        let q = sql::select_list(
            resource,
            &query.filters,
            query.visible_only,
            Some(limit),
            query.offset,
        );
        Self::query_many(pool, &q).await
    }

    /// Fetch one row by primary key.
    pub async fn read(db: &Db, resource: &Resource, id: i64) -> Result<Option<Value>, AppError> {
        let Some(pool) = db.pool() else {
            return Ok(None);
        };
        let mut q = sql::select_by_id(resource);
        q.params.push(Value::from(id));
        Self::query_one(pool, &q).await
    }

    /// Fetch one row by slug. Resources without slugs never match.
    pub async fn read_by_slug(
        db: &Db,
        resource: &Resource,
        slug: &str,
        visible_only: bool,
    ) -> Result<Option<Value>, AppError> {
        let (Some(pool), Some(column)) = (db.pool(), resource.column("slug")) else {
            return Ok(None);
        };
        let q = sql::select_by_column(resource, column, Value::String(slug.to_string()), visible_only);
        Self::query_one(pool, &q).await
    }

    pub async fn count(db: &Db, resource: &Resource) -> Result<i64, AppError> {
        let Some(pool) = db.pool() else {
            return Ok(0);
        };
        let q = sql::count(resource);
        tracing::debug!(sql = %q.sql, "query");
        let n: i64 = sqlx::query_scalar(&q.sql).fetch_one(pool).await?;
        Ok(n)
    }

    /// Insert one row. Returns created row.
    pub async fn create(db: &Db, resource: &Resource, body: &HashMap<String, Value>) -> Result<Value, AppError> {
        let pool = db.require()?;
        let q = sql::insert(resource, body);
        let row = Self::query_one(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        Ok(row)
    }

    /// Update one row by id. Returns updated row, or None when the id does not exist.
    pub async fn update(
        db: &Db,
        resource: &Resource,
        id: i64,
        body: &HashMap<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let pool = db.require()?;
        let q = sql::update(resource, id, body);
        Self::query_one(pool, &q).await
    }

    /// Delete one row by id. Returns deleted row or None.
    pub async fn delete(db: &Db, resource: &Resource, id: i64) -> Result<Option<Value>, AppError> {
        let pool = db.require()?;
        let mut q = sql::delete(resource);
        q.params.push(Value::from(id));
        Self::query_one(pool, &q).await
    }

    async fn query_one(pool: &PgPool, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p)?);
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn query_many(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p)?);
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

pub(crate) fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

/// Decode one cell by trying the column types the content tables use.
fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(j)) = row.try_get::<Option<Value>, _>(name) {
        return j;
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{SERVICES, TEAM_MEMBERS};

    #[test]
    fn list_query_builders() {
        let q = ListQuery::visible().filter("category", "yol").limit(3);
        assert!(q.visible_only);
        assert_eq!(q.filters, vec![("category".to_string(), Value::from("yol"))]);
        assert_eq!(q.limit, Some(3));
        assert!(!ListQuery::all().visible_only);
    }

    #[tokio::test]
    async fn unconfigured_reads_are_empty() {
        let db = Db::unconfigured();
        assert!(CrudService::list(&db, &SERVICES, &ListQuery::visible()).await.unwrap().is_empty());
        assert!(CrudService::read(&db, &SERVICES, 1).await.unwrap().is_none());
        assert!(CrudService::read_by_slug(&db, &SERVICES, "kazi", true).await.unwrap().is_none());
        assert_eq!(CrudService::count(&db, &TEAM_MEMBERS).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unconfigured_writes_fail() {
        let db = Db::unconfigured();
        let body = HashMap::new();
        assert!(matches!(
            CrudService::create(&db, &SERVICES, &body).await,
            Err(AppError::NotConfigured(_))
        ));
        assert!(matches!(
            CrudService::delete(&db, &SERVICES, 1).await,
            Err(AppError::NotConfigured(_))
        ));
    }
}
