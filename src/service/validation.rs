//! Request validation and value coercion from catalog column rules.

use crate::error::AppError;
use crate::resources::{Column, ColumnKind, Format, Resource};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. All required columns must be present and non-blank.
    pub fn validate(body: &mut HashMap<String, Value>, resource: &Resource) -> Result<(), AppError> {
        for c in resource.columns {
            if c.rule.required && is_blank(body.get(c.name)) {
                return Err(AppError::Validation(format!("{} is required", c.name)));
            }
        }
        Self::validate_partial(body, resource)
    }

    /// Validate only the columns present in body (updates). Required columns may be
    /// omitted but not cleared.
    pub fn validate_partial(body: &mut HashMap<String, Value>, resource: &Resource) -> Result<(), AppError> {
        for c in resource.columns {
            let Some(v) = body.get_mut(c.name) else { continue };
            if c.rule.required && is_blank(Some(v)) {
                return Err(AppError::Validation(format!("{} must not be empty", c.name)));
            }
            coerce(c, v)?;
            validate_field(c, v)?;
        }
        Ok(())
    }
}

fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Bring form-style values to the column's JSON shape ("3" -> 3, "on" -> true, "" -> null).
fn coerce(c: &Column, v: &mut Value) -> Result<(), AppError> {
    let bad = |expected: &str| AppError::Validation(format!("{} must be {}", c.name, expected));
    let coerced = match (c.kind, &*v) {
        (_, Value::Null) => return Ok(()),
        (ColumnKind::Text, Value::String(_)) => return Ok(()),
        (ColumnKind::Text, Value::Number(n)) => Value::String(n.to_string()),
        (ColumnKind::Text, _) => return Err(bad("a string")),
        (ColumnKind::Integer, Value::Number(n)) if n.as_i64().is_some_and(fits_integer) => return Ok(()),
        (ColumnKind::Integer, Value::String(s)) if s.trim().is_empty() => Value::Null,
        (ColumnKind::Integer, Value::String(s)) => {
            let n: i64 = s.trim().parse().map_err(|_| bad("an integer"))?;
            if !fits_integer(n) {
                return Err(bad("an integer"));
            }
            Value::from(n)
        }
        (ColumnKind::Integer, _) => return Err(bad("an integer")),
        (ColumnKind::Boolean, Value::Bool(_)) => return Ok(()),
        (ColumnKind::Boolean, Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => Value::Bool(true),
            "false" | "off" | "0" | "" => Value::Bool(false),
            _ => return Err(bad("a boolean")),
        },
        (ColumnKind::Boolean, _) => return Err(bad("a boolean")),
        (ColumnKind::Json, Value::Array(_) | Value::Object(_)) => return Ok(()),
        // comma separated lists from plain text inputs
        (ColumnKind::Json, Value::String(s)) => Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| Value::String(p.to_string()))
                .collect(),
        ),
        (ColumnKind::Json, _) => return Err(bad("a list")),
        (ColumnKind::Date | ColumnKind::Timestamptz, Value::String(s)) if s.trim().is_empty() => Value::Null,
        (ColumnKind::Date, Value::String(s)) => {
            if !is_date(s.trim()) {
                return Err(bad("a date (YYYY-MM-DD)"));
            }
            return Ok(());
        }
        (ColumnKind::Timestamptz, Value::String(s)) => {
            if !is_timestamp(s.trim()) {
                return Err(bad("a timestamp"));
            }
            return Ok(());
        }
        (ColumnKind::Date | ColumnKind::Timestamptz, _) => return Err(bad("a date string")),
    };
    *v = coerced;
    Ok(())
}

/// Integer columns are PostgreSQL `integer` (32-bit).
pub fn fits_integer(n: i64) -> bool {
    i32::try_from(n).is_ok()
}

pub fn is_date(s: &str) -> bool {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// RFC 3339, `datetime-local` form values, or a bare date.
pub fn is_timestamp(s: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(s).is_ok()
        || chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok()
        || is_date(s)
}

fn validate_field(c: &Column, v: &Value) -> Result<(), AppError> {
    let Some(s) = v.as_str() else { return Ok(()) };
    if let Some(max) = c.rule.max_length {
        if s.chars().count() > max as usize {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                c.name, max
            )));
        }
    }
    if !c.rule.allowed.is_empty() && !c.rule.allowed.contains(&s) {
        return Err(AppError::Validation(format!(
            "{} must be one of: {}",
            c.name,
            c.rule.allowed.join(", ")
        )));
    }
    if let Some(format) = c.rule.format {
        if !s.is_empty() && !matches_format(s, format) {
            let what = match format {
                Format::Email => "a valid email",
                Format::Link => "a path or http(s) URL",
            };
            return Err(AppError::Validation(format!("{} must be {}", c.name, what)));
        }
    }
    Ok(())
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
    })
}

pub fn matches_format(s: &str, format: Format) -> bool {
    match format {
        Format::Email => email_regex().is_match(s),
        Format::Link => {
            s.starts_with('/') || s.starts_with('#') || s.starts_with("https://") || s.starts_with("http://")
        }
    }
}
