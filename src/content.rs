//! Read-only content facade used by the public pages.
//!
//! Every getter degrades to an empty list or `None` on any failure (missing
//! database, query error, malformed row) and logs a warning instead of failing
//! the page.

use crate::models::{
    from_row, BlogPost, CompanyStat, Faq, HeroSlide, Project, Region, Service, TeamMember,
};
use crate::resources::{
    Resource, BLOG_POSTS, COMPANY_STATS, FAQS, HERO_CAROUSEL, PROJECTS, REGIONS, SERVICES,
    TEAM_MEMBERS,
};
use crate::service::{page_content, CrudService, ListQuery};
use crate::store::Db;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

async fn fetch_list<T: DeserializeOwned>(db: &Db, resource: &Resource, query: ListQuery) -> Vec<T> {
    match CrudService::list(db, resource, &query).await {
        Ok(rows) => rows.into_iter().filter_map(from_row).collect(),
        Err(e) => {
            tracing::warn!(table = resource.table, error = %e, "content list failed");
            Vec::new()
        }
    }
}

async fn fetch_by_slug<T: DeserializeOwned>(db: &Db, resource: &Resource, slug: &str) -> Option<T> {
    match CrudService::read_by_slug(db, resource, slug, true).await {
        Ok(row) => row.and_then(from_row),
        Err(e) => {
            tracing::warn!(table = resource.table, slug = %slug, error = %e, "content lookup failed");
            None
        }
    }
}

pub async fn get_services(db: &Db) -> Vec<Service> {
    fetch_list(db, &SERVICES, ListQuery::visible()).await
}

pub async fn get_service_by_slug(db: &Db, slug: &str) -> Option<Service> {
    fetch_by_slug(db, &SERVICES, slug).await
}

pub async fn get_projects(db: &Db) -> Vec<Project> {
    fetch_list(db, &PROJECTS, ListQuery::visible()).await
}

pub async fn get_featured_projects(db: &Db, limit: u32) -> Vec<Project> {
    fetch_list(db, &PROJECTS, ListQuery::visible().filter("is_featured", true).limit(limit)).await
}

pub async fn get_project_by_slug(db: &Db, slug: &str) -> Option<Project> {
    fetch_by_slug(db, &PROJECTS, slug).await
}

pub async fn get_projects_by_region(db: &Db, region_id: i64) -> Vec<Project> {
    fetch_list(db, &PROJECTS, ListQuery::visible().filter("region_id", region_id)).await
}

/// Published posts, newest first.
pub async fn get_blog_posts(db: &Db) -> Vec<BlogPost> {
    fetch_list(db, &BLOG_POSTS, ListQuery::visible()).await
}

pub async fn get_recent_blog_posts(db: &Db, limit: u32) -> Vec<BlogPost> {
    fetch_list(db, &BLOG_POSTS, ListQuery::visible().limit(limit)).await
}

pub async fn get_blog_post_by_slug(db: &Db, slug: &str) -> Option<BlogPost> {
    fetch_by_slug(db, &BLOG_POSTS, slug).await
}

pub async fn get_regions(db: &Db) -> Vec<Region> {
    fetch_list(db, &REGIONS, ListQuery::visible()).await
}

pub async fn get_region_by_slug(db: &Db, slug: &str) -> Option<Region> {
    fetch_by_slug(db, &REGIONS, slug).await
}

pub async fn get_region_by_id(db: &Db, id: i64) -> Option<Region> {
    match CrudService::read(db, &REGIONS, id).await {
        Ok(row) => row.and_then(from_row),
        Err(e) => {
            tracing::warn!(id, error = %e, "region lookup failed");
            None
        }
    }
}

pub async fn get_hero_slides(db: &Db) -> Vec<HeroSlide> {
    fetch_list(db, &HERO_CAROUSEL, ListQuery::visible()).await
}

pub async fn get_team_members(db: &Db) -> Vec<TeamMember> {
    fetch_list(db, &TEAM_MEMBERS, ListQuery::visible()).await
}

pub async fn get_company_stats(db: &Db) -> Vec<CompanyStat> {
    fetch_list(db, &COMPANY_STATS, ListQuery::all()).await
}

/// Active FAQs, optionally narrowed to one category.
pub async fn get_faqs(db: &Db, category: Option<&str>) -> Vec<Faq> {
    let mut query = ListQuery::visible();
    if let Some(c) = category {
        query = query.filter("category", c);
    }
    fetch_list(db, &FAQS, query).await
}

/// Page copy keyed by `"section.key"`.
pub async fn get_page_content(db: &Db, page: &str) -> HashMap<String, String> {
    match page_content::list(db, Some(page)).await {
        Ok(rows) => page_content::to_map(&rows),
        Err(e) => {
            tracing::warn!(page = %page, error = %e, "page content lookup failed");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_database_degrades_to_empty() {
        let db = Db::unconfigured();
        assert!(get_services(&db).await.is_empty());
        assert!(get_featured_projects(&db, 3).await.is_empty());
        assert!(get_projects_by_region(&db, 1).await.is_empty());
        assert!(get_recent_blog_posts(&db, 3).await.is_empty());
        assert!(get_faqs(&db, Some("genel")).await.is_empty());
        assert!(get_company_stats(&db).await.is_empty());
        assert!(get_page_content(&db, "home").await.is_empty());
        assert!(get_service_by_slug(&db, "kazi").await.is_none());
        assert!(get_region_by_id(&db, 1).await.is_none());
        assert!(get_blog_post_by_slug(&db, "x").await.is_none());
    }
}
