//! Database handle and content-table DDL. Tables are created idempotently at startup.

use crate::error::AppError;
use crate::resources::{self, Resource};
use crate::sql::quoted;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Optional connection pool. Without `DATABASE_URL` the site still serves pages, with empty content.
#[derive(Clone, Default)]
pub struct Db {
    pool: Option<PgPool>,
}

impl Db {
    pub fn new(pool: PgPool) -> Self {
        Db { pool: Some(pool) }
    }

    pub fn unconfigured() -> Self {
        Db { pool: None }
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Pool for writes; an unconfigured database is an error here.
    pub fn require(&self) -> Result<&PgPool, AppError> {
        self.pool.as_ref().ok_or(AppError::NotConfigured("database"))
    }

    pub fn is_configured(&self) -> bool {
        self.pool.is_some()
    }
}

/// Connect, creating the database first when it does not exist.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<Db, AppError> {
    ensure_database_exists(database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    ensure_tables(&pool).await?;
    Ok(Db::new(pool))
}

/// CREATE TABLE IF NOT EXISTS for one catalog resource.
pub fn create_table_sql(resource: &Resource) -> String {
    let mut defs = vec!["\"id\" SERIAL PRIMARY KEY".to_string()];
    for c in resource.columns {
        let mut def = format!("{} {}", quoted(c.name), c.kind.pg_type().to_uppercase());
        if c.rule.required {
            def.push_str(" NOT NULL");
        }
        if let Some(d) = c.default {
            def.push_str(" DEFAULT ");
            def.push_str(d);
        }
        if let Some(target) = c.references {
            def.push_str(" REFERENCES ");
            def.push_str(target);
        }
        defs.push(def);
    }
    defs.push("\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()".into());
    defs.push("\"updated_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()".into());
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(resource.table),
        defs.join(",\n  ")
    )
}

pub const PAGE_CONTENT_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS "page_content" (
        "id" SERIAL PRIMARY KEY,
        "page" TEXT NOT NULL,
        "section" TEXT NOT NULL,
        "key" TEXT NOT NULL,
        "value" TEXT,
        "content_type" TEXT NOT NULL DEFAULT 'text',
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        "updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE ("page", "section", "key")
    )
"#;

/// Create every content table and slug index if missing.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for resource in resources::ALL {
        let ddl = create_table_sql(resource);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
        if resource.has_slug() {
            let index = format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON {} (\"slug\")",
                quoted(&format!("{}_slug_key", resource.table)),
                quoted(resource.table)
            );
            sqlx::query(&index).execute(pool).await?;
        }
    }
    sqlx::query(PAGE_CONTENT_DDL).execute(pool).await?;
    tracing::info!(tables = resources::ALL.len() + 1, "content tables ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_db_name(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `postgres://host/name?opts` into (`postgres://host/postgres?opts`, `name`).
fn split_db_name(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}
