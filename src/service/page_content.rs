//! Editable page copy addressed by (page, section, key).

use crate::error::AppError;
use crate::service::crud::row_to_json;
use crate::store::Db;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const COLUMNS: &str = r#""id", "page", "section", "key", "value", "content_type", "created_at", "updated_at""#;

pub const CONTENT_TYPES: &[&str] = &["text", "image"];

#[derive(Clone, Debug, Deserialize)]
pub struct PageContentInput {
    pub page: String,
    pub section: String,
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, alias = "contentType")]
    pub content_type: Option<String>,
}

impl PageContentInput {
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, v) in [("page", &self.page), ("section", &self.section), ("key", &self.key)] {
            if v.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", name)));
            }
            if v.len() > 100 {
                return Err(AppError::Validation(format!("{} must be at most 100 characters", name)));
            }
        }
        if let Some(t) = &self.content_type {
            if !CONTENT_TYPES.contains(&t.as_str()) {
                return Err(AppError::Validation(format!(
                    "content_type must be one of: {}",
                    CONTENT_TYPES.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Rows for one page (or every page), ordered by section then key.
pub async fn list(db: &Db, page: Option<&str>) -> Result<Vec<Value>, AppError> {
    let Some(pool) = db.pool() else {
        return Ok(Vec::new());
    };
    let rows = match page {
        Some(page) => {
            let sql = format!(
                r#"SELECT {} FROM "page_content" WHERE "page" = $1 ORDER BY "section", "key""#,
                COLUMNS
            );
            tracing::debug!(sql = %sql, page = %page, "query");
            sqlx::query(&sql).bind(page).fetch_all(pool).await?
        }
        None => {
            let sql = format!(
                r#"SELECT {} FROM "page_content" ORDER BY "page", "section", "key""#,
                COLUMNS
            );
            tracing::debug!(sql = %sql, "query");
            sqlx::query(&sql).fetch_all(pool).await?
        }
    };
    Ok(rows.iter().map(row_to_json).collect())
}

/// Insert or replace the value at (page, section, key).
pub async fn upsert(db: &Db, input: &PageContentInput) -> Result<Value, AppError> {
    let pool = db.require()?;
    let sql = format!(
        r#"
        INSERT INTO "page_content" ("page", "section", "key", "value", "content_type", "updated_at")
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT ("page", "section", "key")
        DO UPDATE SET "value" = EXCLUDED."value", "content_type" = EXCLUDED."content_type", "updated_at" = NOW()
        RETURNING {}
        "#,
        COLUMNS
    );
    tracing::debug!(page = %input.page, section = %input.section, key = %input.key, "page content upsert");
    let row = sqlx::query(&sql)
        .bind(input.page.trim())
        .bind(input.section.trim())
        .bind(input.key.trim())
        .bind(&input.value)
        .bind(input.content_type.as_deref().unwrap_or("text"))
        .fetch_one(pool)
        .await?;
    Ok(row_to_json(&row))
}

pub async fn delete(db: &Db, id: i64) -> Result<Option<Value>, AppError> {
    let pool = db.require()?;
    let sql = format!(r#"DELETE FROM "page_content" WHERE "id" = $1::integer RETURNING {}"#, COLUMNS);
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
    Ok(row.map(|r| row_to_json(&r)))
}

pub async fn count(db: &Db) -> Result<i64, AppError> {
    let Some(pool) = db.pool() else {
        return Ok(0);
    };
    let n: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "page_content""#)
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Fold rows into `"section.key" -> value` for template lookups.
pub fn to_map(rows: &[Value]) -> HashMap<String, String> {
    rows.iter()
        .filter_map(|r| {
            let section = r.get("section")?.as_str()?;
            let key = r.get("key")?.as_str()?;
            let value = r.get("value")?.as_str()?;
            Some((format!("{}.{}", section, key), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(v: Value) -> PageContentInput {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn accepts_camel_case_content_type() {
        let i = input(json!({ "page": "home", "section": "hero", "key": "title", "contentType": "image" }));
        assert_eq!(i.content_type.as_deref(), Some("image"));
        assert!(i.validate().is_ok());
    }

    #[test]
    fn rejects_blank_address_and_unknown_type() {
        assert!(input(json!({ "page": " ", "section": "hero", "key": "t" })).validate().is_err());
        assert!(input(json!({ "page": "home", "section": "hero", "key": "t", "content_type": "video" }))
            .validate()
            .is_err());
    }

    #[test]
    fn map_skips_null_values() {
        let rows = vec![
            json!({ "section": "hero", "key": "title", "value": "Güçlü Makine Parkı" }),
            json!({ "section": "hero", "key": "image", "value": null }),
        ];
        let m = to_map(&rows);
        assert_eq!(m.get("hero.title").map(String::as_str), Some("Güçlü Makine Parkı"));
        assert!(!m.contains_key("hero.image"));
    }

    #[tokio::test]
    async fn unconfigured_list_is_empty() {
        assert!(list(&Db::unconfigured(), Some("home")).await.unwrap().is_empty());
    }
}
