//! Typed rows for the public pages. Built from the JSON rows the CRUD layer returns.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deserialize a row, treating NULL columns as absent so field defaults apply.
pub fn from_row<T: DeserializeOwned>(row: Value) -> Option<T> {
    let Value::Object(mut map) = row else { return None };
    map.retain(|_, v| !v.is_null());
    match serde_json::from_value(Value::Object(map)) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "row does not match model");
            None
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
    pub features: Vec<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub region_id: Option<i64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub completed_at: Option<String>,
    pub is_featured: bool,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Rich-text HTML from the admin editor.
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub published_at: Option<String>,
    pub updated_at: Option<String>,
}

impl BlogPost {
    /// `YYYY-MM-DD` part of the publish timestamp.
    pub fn published_date(&self) -> Option<&str> {
        self.published_at.as_deref().and_then(|s| s.get(..10))
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSlide {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub image_url: String,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub secondary_button_text: Option<String>,
    pub secondary_button_link: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyStat {
    pub id: i64,
    pub label: String,
    pub value: String,
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_fall_back_to_defaults() {
        let row = json!({
            "id": 3,
            "title": "Kazı",
            "slug": "kazi",
            "features": null,
            "image_url": null,
            "is_active": true
        });
        let s: Service = from_row(row).unwrap();
        assert_eq!(s.id, 3);
        assert!(s.features.is_empty());
        assert!(s.image_url.is_none());
    }

    #[test]
    fn mismatched_rows_are_skipped() {
        assert!(from_row::<Service>(json!({ "id": "not a number" })).is_none());
        assert!(from_row::<Service>(json!([1, 2])).is_none());
    }

    #[test]
    fn published_date_is_day_part() {
        let p = BlogPost {
            published_at: Some("2024-03-09T08:00:00+00:00".into()),
            ..Default::default()
        };
        assert_eq!(p.published_date(), Some("2024-03-09"));
    }
}
