//! Crawler endpoints.

use crate::content;
use crate::seo::{self, SitemapEntry};
use crate::state::AppState;
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

const STATIC_PATHS: &[&str] = &["/", "/hizmetler", "/projeler", "/bolgeler", "/blog", "/hakkimizda", "/iletisim"];

pub async fn sitemap(State(state): State<AppState>) -> Response {
    let db = &state.db;
    let (services, projects, regions, posts) = tokio::join!(
        content::get_services(db),
        content::get_projects(db),
        content::get_regions(db),
        content::get_blog_posts(db),
    );
    let mut entries: Vec<SitemapEntry> = STATIC_PATHS.iter().map(|p| SitemapEntry::new(*p, None)).collect();
    entries.extend(
        services
            .iter()
            .map(|s| SitemapEntry::new(format!("/hizmetler/{}", s.slug), s.updated_at.as_deref())),
    );
    entries.extend(
        projects
            .iter()
            .map(|p| SitemapEntry::new(format!("/projeler/{}", p.slug), p.updated_at.as_deref())),
    );
    entries.extend(
        regions
            .iter()
            .map(|r| SitemapEntry::new(format!("/bolgeler/{}", r.slug), r.updated_at.as_deref())),
    );
    entries.extend(posts.iter().map(|p| {
        let modified = p.updated_at.as_deref().or(p.published_at.as_deref());
        SitemapEntry::new(format!("/blog/{}", p.slug), modified)
    }));
    let xml = seo::sitemap_xml(&state.config.site, &entries);
    ([(CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
}

pub async fn robots(State(state): State<AppState>) -> Response {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots_txt(&state.config.site),
    )
        .into_response()
}
