//! Static catalog of the content tables served by the CRUD API.
//! Identifiers used in generated SQL come only from here; request values are always bound.

/// Column value kind. Drives DDL types, bind casts, and query-string parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Boolean,
    Json,
    Date,
    Timestamptz,
}

impl ColumnKind {
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Integer => "integer",
            ColumnKind::Boolean => "boolean",
            ColumnKind::Json => "jsonb",
            ColumnKind::Date => "date",
            ColumnKind::Timestamptz => "timestamptz",
        }
    }
}

/// Built-in string formats checked by the request validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    /// Relative path ("/hizmetler") or http(s) URL.
    Link,
}

/// Per-column validation applied to create/update bodies.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub required: bool,
    pub max_length: Option<u32>,
    pub format: Option<Format>,
    pub allowed: &'static [&'static str],
}

impl Rule {
    const NONE: Rule = Rule {
        required: false,
        max_length: None,
        format: None,
        allowed: &[],
    };
}

#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
    /// SQL default expression used in DDL; inserts omit the column when the body does.
    pub default: Option<&'static str>,
    /// Foreign key target for DDL, e.g. `regions(id) ON DELETE SET NULL`.
    pub references: Option<&'static str>,
    pub rule: Rule,
}

impl Column {
    const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Column {
            name,
            kind,
            default: None,
            references: None,
            rule: Rule::NONE,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Text)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Integer)
    }

    pub const fn flag(name: &'static str, default: &'static str) -> Self {
        Self::new(name, ColumnKind::Boolean).default(default)
    }

    pub const fn json(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Json).default("'[]'::jsonb")
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Date)
    }

    pub const fn timestamptz(name: &'static str) -> Self {
        Self::new(name, ColumnKind::Timestamptz)
    }

    pub const fn default(mut self, expr: &'static str) -> Self {
        self.default = Some(expr);
        self
    }

    pub const fn references(mut self, target: &'static str) -> Self {
        self.references = Some(target);
        self
    }

    pub const fn required(mut self) -> Self {
        self.rule.required = true;
        self
    }

    pub const fn max(mut self, n: u32) -> Self {
        self.rule.max_length = Some(n);
        self
    }

    pub const fn format(mut self, f: Format) -> Self {
        self.rule.format = Some(f);
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.rule.allowed = values;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// One CRUD resource: a table plus how the API and public pages address it.
#[derive(Debug)]
pub struct Resource {
    pub table: &'static str,
    pub path_segment: &'static str,
    /// Human label for the admin dashboard.
    pub label: &'static str,
    /// Writable columns; `id`, `created_at`, `updated_at` are implicit.
    pub columns: &'static [Column],
    /// ORDER BY fragment for lists.
    pub order_by: &'static str,
    /// Column the slug is derived from, when the resource is addressed by slug.
    pub slug_source: Option<&'static str>,
    /// Boolean column hiding rows from public pages (`is_active` / `is_published`).
    pub visibility_column: Option<&'static str>,
}

impl Resource {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_slug(&self) -> bool {
        self.slug_source.is_some()
    }
}

pub static SERVICES: Resource = Resource {
    table: "services",
    path_segment: "services",
    label: "Hizmetler",
    columns: &[
        Column::text("title").required().max(200),
        Column::text("slug").required().max(220),
        Column::text("short_description").max(500),
        Column::text("description"),
        Column::text("icon").max(100),
        Column::text("image_url").max(1000),
        Column::json("features"),
        Column::int("display_order").default("0"),
        Column::flag("is_active", "TRUE"),
    ],
    order_by: "\"display_order\" ASC, \"id\" ASC",
    slug_source: Some("title"),
    visibility_column: Some("is_active"),
};

pub static REGIONS: Resource = Resource {
    table: "regions",
    path_segment: "regions",
    label: "Bölgeler",
    columns: &[
        Column::text("name").required().max(200),
        Column::text("slug").required().max(220),
        Column::text("description").max(1000),
        Column::text("content"),
        Column::text("image_url").max(1000),
        Column::int("display_order").default("0"),
        Column::flag("is_active", "TRUE"),
    ],
    order_by: "\"display_order\" ASC, \"name\" ASC",
    slug_source: Some("name"),
    visibility_column: Some("is_active"),
};

pub static PROJECTS: Resource = Resource {
    table: "projects",
    path_segment: "projects",
    label: "Projeler",
    columns: &[
        Column::text("title").required().max(200),
        Column::text("slug").required().max(220),
        Column::text("description"),
        Column::text("client").max(200),
        Column::text("location").max(200),
        Column::int("region_id").references("regions(id) ON DELETE SET NULL"),
        Column::text("category").max(100),
        Column::text("image_url").max(1000),
        Column::json("gallery"),
        Column::date("completed_at"),
        Column::flag("is_featured", "FALSE"),
        Column::int("display_order").default("0"),
        Column::flag("is_active", "TRUE"),
    ],
    order_by: "\"display_order\" ASC, \"id\" DESC",
    slug_source: Some("title"),
    visibility_column: Some("is_active"),
};

pub static BLOG_POSTS: Resource = Resource {
    table: "blog_posts",
    path_segment: "blog",
    label: "Blog Yazıları",
    columns: &[
        Column::text("title").required().max(250),
        Column::text("slug").required().max(270),
        Column::text("excerpt").max(1000),
        Column::text("content"),
        Column::text("cover_image").max(1000),
        Column::text("author").max(120),
        Column::json("tags"),
        Column::text("meta_title").max(250),
        Column::text("meta_description").max(500),
        Column::flag("is_published", "FALSE"),
        Column::timestamptz("published_at"),
    ],
    order_by: "\"published_at\" DESC NULLS LAST, \"id\" DESC",
    slug_source: Some("title"),
    visibility_column: Some("is_published"),
};

pub static HERO_CAROUSEL: Resource = Resource {
    table: "hero_carousel",
    path_segment: "hero-carousel",
    label: "Ana Sayfa Slaytları",
    columns: &[
        Column::text("title").required().max(200),
        Column::text("subtitle").max(500),
        Column::text("image_url").required().max(1000),
        Column::text("button_text").max(100),
        Column::text("button_link").max(500).format(Format::Link),
        Column::text("secondary_button_text").max(100),
        Column::text("secondary_button_link").max(500).format(Format::Link),
        Column::int("display_order").default("0"),
        Column::flag("is_active", "TRUE"),
    ],
    order_by: "\"display_order\" ASC, \"id\" ASC",
    slug_source: None,
    visibility_column: Some("is_active"),
};

pub static TEAM_MEMBERS: Resource = Resource {
    table: "team_members",
    path_segment: "team-members",
    label: "Ekip",
    columns: &[
        Column::text("name").required().max(150),
        Column::text("position").max(150),
        Column::text("bio"),
        Column::text("image_url").max(1000),
        Column::int("display_order").default("0"),
        Column::flag("is_active", "TRUE"),
    ],
    order_by: "\"display_order\" ASC, \"id\" ASC",
    slug_source: None,
    visibility_column: Some("is_active"),
};

pub static COMPANY_STATS: Resource = Resource {
    table: "company_stats",
    path_segment: "company-stats",
    label: "İstatistikler",
    columns: &[
        Column::text("label").required().max(100),
        Column::text("value").required().max(50),
        Column::text("icon").max(100),
        Column::int("display_order").default("0"),
    ],
    order_by: "\"display_order\" ASC, \"id\" ASC",
    slug_source: None,
    visibility_column: None,
};

pub static FAQS: Resource = Resource {
    table: "faqs",
    path_segment: "faqs",
    label: "Sıkça Sorulan Sorular",
    columns: &[
        Column::text("question").required().max(500),
        Column::text("answer").required(),
        Column::text("category").max(100),
        Column::int("display_order").default("0"),
        Column::flag("is_active", "TRUE"),
    ],
    order_by: "\"display_order\" ASC, \"id\" ASC",
    slug_source: None,
    visibility_column: Some("is_active"),
};

/// Every catalog resource, in DDL dependency order (regions before projects).
pub static ALL: &[&Resource] = &[
    &SERVICES,
    &REGIONS,
    &PROJECTS,
    &BLOG_POSTS,
    &HERO_CAROUSEL,
    &TEAM_MEMBERS,
    &COMPANY_STATS,
    &FAQS,
];

pub fn by_path(segment: &str) -> Option<&'static Resource> {
    ALL.iter().copied().find(|r| r.path_segment == segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn path_segments_are_unique() {
        let segments: HashSet<_> = ALL.iter().map(|r| r.path_segment).collect();
        assert_eq!(segments.len(), ALL.len());
    }

    #[test]
    fn lookup_by_path() {
        assert_eq!(by_path("blog").map(|r| r.table), Some("blog_posts"));
        assert_eq!(by_path("hero-carousel").map(|r| r.table), Some("hero_carousel"));
        assert!(by_path("page-content").is_none());
    }

    #[test]
    fn slug_resources_have_slug_and_source_columns() {
        for r in ALL.iter().filter(|r| r.has_slug()) {
            assert!(r.column("slug").is_some(), "{} lacks slug", r.table);
            assert!(r.column(r.slug_source.unwrap_or_default()).is_some());
        }
    }

    #[test]
    fn visibility_columns_are_boolean() {
        for r in ALL {
            if let Some(v) = r.visibility_column {
                assert_eq!(r.column(v).map(|c| c.kind), Some(ColumnKind::Boolean));
            }
        }
    }

    #[test]
    fn referenced_tables_come_first() {
        let pos = |t: &str| ALL.iter().position(|r| r.table == t);
        assert!(pos("regions") < pos("projects"));
    }
}
