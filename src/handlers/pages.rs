//! Server-rendered public pages.

use crate::config::SiteInfo;
use crate::content;
use crate::models::{BlogPost, CompanyStat, Faq, HeroSlide, Project, Region, Service, TeamMember};
use crate::seo;
use crate::state::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;
use std::collections::HashMap;

const FEATURED_PROJECTS: u32 = 6;
const RECENT_POSTS: u32 = 3;

/// Template wrapper that converts Askama templates into HTML responses.
pub(crate) struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "template render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Sayfa oluşturulamadı").into_response()
            }
        }
    }
}

/// Head and chrome shared by every page.
pub(crate) struct Layout {
    pub site: SiteInfo,
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub json_ld: String,
}

impl Layout {
    /// `title` of None means the site name alone (home page).
    pub(crate) fn new(
        site: &SiteInfo,
        title: Option<&str>,
        description: Option<&str>,
        path: &str,
        json_ld: &[Value],
    ) -> Self {
        let mut blocks = vec![seo::organization(site)];
        blocks.extend_from_slice(json_ld);
        Layout {
            site: site.clone(),
            title: match title {
                Some(t) => format!("{} | {}", t, site.name),
                None => site.name.clone(),
            },
            description: description.unwrap_or_default().to_string(),
            canonical: format!("{}{}", site.url, path),
            json_ld: seo::script_tags(&blocks),
        }
    }
}

fn text(content: &HashMap<String, String>, key: &str, fallback: &str) -> String {
    content
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    layout: Layout,
    headline: String,
    intro: String,
    slides: Vec<HeroSlide>,
    services: Vec<Service>,
    projects: Vec<Project>,
    stats: Vec<CompanyStat>,
    posts: Vec<BlogPost>,
    faqs: Vec<Faq>,
}

pub async fn home(State(state): State<AppState>) -> Response {
    let db = &state.db;
    let (slides, services, projects, stats, posts, faqs, copy) = tokio::join!(
        content::get_hero_slides(db),
        content::get_services(db),
        content::get_featured_projects(db, FEATURED_PROJECTS),
        content::get_company_stats(db),
        content::get_recent_blog_posts(db, RECENT_POSTS),
        content::get_faqs(db, None),
        content::get_page_content(db, "home"),
    );
    let site = &state.config.site;
    let description = text(&copy, "seo.description", "");
    let layout = Layout::new(
        site,
        None,
        Some(description.as_str()),
        "/",
        &[seo::faq_page(&faqs)],
    );
    HtmlTemplate(HomeTemplate {
        layout,
        headline: text(&copy, "hero.title", &site.name),
        intro: text(&copy, "hero.subtitle", "Hafriyat, kazı ve altyapı hizmetleri"),
        slides,
        services,
        projects,
        stats,
        posts,
        faqs,
    })
    .into_response()
}

#[derive(Template)]
#[template(path = "services.html")]
struct ServicesTemplate {
    layout: Layout,
    services: Vec<Service>,
}

pub async fn services(State(state): State<AppState>) -> Response {
    let services = content::get_services(&state.db).await;
    let site = &state.config.site;
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("Hizmetler", "/hizmetler")]);
    let layout = Layout::new(site, Some("Hizmetler"), None, "/hizmetler", &[crumbs]);
    HtmlTemplate(ServicesTemplate { layout, services }).into_response()
}

#[derive(Template)]
#[template(path = "service.html")]
struct ServiceTemplate {
    layout: Layout,
    service: Service,
    others: Vec<Service>,
}

pub async fn service(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(service) = content::get_service_by_slug(&state.db, &slug).await else {
        return not_found_page(&state);
    };
    let others = content::get_services(&state.db)
        .await
        .into_iter()
        .filter(|s| s.id != service.id)
        .collect();
    let site = &state.config.site;
    let path = format!("/hizmetler/{}", service.slug);
    let crumbs = seo::breadcrumbs(
        site,
        &[("Ana Sayfa", "/"), ("Hizmetler", "/hizmetler"), (service.title.as_str(), path.as_str())],
    );
    let layout = Layout::new(
        site,
        Some(service.title.as_str()),
        service.short_description.as_deref(),
        &path,
        &[seo::service(site, &service), crumbs],
    );
    HtmlTemplate(ServiceTemplate { layout, service, others }).into_response()
}

#[derive(Template)]
#[template(path = "projects.html")]
struct ProjectsTemplate {
    layout: Layout,
    projects: Vec<Project>,
}

pub async fn projects(State(state): State<AppState>) -> Response {
    let projects = content::get_projects(&state.db).await;
    let site = &state.config.site;
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("Projeler", "/projeler")]);
    let layout = Layout::new(site, Some("Projeler"), None, "/projeler", &[crumbs]);
    HtmlTemplate(ProjectsTemplate { layout, projects }).into_response()
}

#[derive(Template)]
#[template(path = "project.html")]
struct ProjectTemplate {
    layout: Layout,
    project: Project,
    region: Option<Region>,
}

pub async fn project(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(project) = content::get_project_by_slug(&state.db, &slug).await else {
        return not_found_page(&state);
    };
    let region = match project.region_id {
        Some(id) => content::get_region_by_id(&state.db, id).await,
        None => None,
    };
    let site = &state.config.site;
    let path = format!("/projeler/{}", project.slug);
    let crumbs = seo::breadcrumbs(
        site,
        &[("Ana Sayfa", "/"), ("Projeler", "/projeler"), (project.title.as_str(), path.as_str())],
    );
    let layout = Layout::new(site, Some(project.title.as_str()), project.location.as_deref(), &path, &[crumbs]);
    HtmlTemplate(ProjectTemplate { layout, project, region }).into_response()
}

#[derive(Template)]
#[template(path = "regions.html")]
struct RegionsTemplate {
    layout: Layout,
    regions: Vec<Region>,
}

pub async fn regions(State(state): State<AppState>) -> Response {
    let regions = content::get_regions(&state.db).await;
    let site = &state.config.site;
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("Bölgeler", "/bolgeler")]);
    let layout = Layout::new(site, Some("Hizmet Bölgeleri"), None, "/bolgeler", &[crumbs]);
    HtmlTemplate(RegionsTemplate { layout, regions }).into_response()
}

#[derive(Template)]
#[template(path = "region.html")]
struct RegionTemplate {
    layout: Layout,
    region: Region,
    services: Vec<Service>,
    projects: Vec<Project>,
}

pub async fn region(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(region) = content::get_region_by_slug(&state.db, &slug).await else {
        return not_found_page(&state);
    };
    let (services, projects) = tokio::join!(
        content::get_services(&state.db),
        content::get_projects_by_region(&state.db, region.id),
    );
    let site = &state.config.site;
    let path = format!("/bolgeler/{}", region.slug);
    let crumbs = seo::breadcrumbs(
        site,
        &[("Ana Sayfa", "/"), ("Bölgeler", "/bolgeler"), (region.name.as_str(), path.as_str())],
    );
    let title = format!("{} Hafriyat", region.name);
    let layout = Layout::new(site, Some(title.as_str()), region.description.as_deref(), &path, &[crumbs]);
    HtmlTemplate(RegionTemplate {
        layout,
        region,
        services,
        projects,
    })
    .into_response()
}

#[derive(Template)]
#[template(path = "blog.html")]
struct BlogTemplate {
    layout: Layout,
    posts: Vec<BlogPost>,
}

pub async fn blog(State(state): State<AppState>) -> Response {
    let posts = content::get_blog_posts(&state.db).await;
    let site = &state.config.site;
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("Blog", "/blog")]);
    let layout = Layout::new(site, Some("Blog"), None, "/blog", &[crumbs]);
    HtmlTemplate(BlogTemplate { layout, posts }).into_response()
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostTemplate {
    layout: Layout,
    post: BlogPost,
    recent: Vec<BlogPost>,
}

pub async fn post(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(post) = content::get_blog_post_by_slug(&state.db, &slug).await else {
        return not_found_page(&state);
    };
    let recent = content::get_recent_blog_posts(&state.db, RECENT_POSTS + 1)
        .await
        .into_iter()
        .filter(|p| p.id != post.id)
        .take(RECENT_POSTS as usize)
        .collect();
    let site = &state.config.site;
    let path = format!("/blog/{}", post.slug);
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("Blog", "/blog"), (post.title.as_str(), path.as_str())]);
    let title = post.meta_title.as_deref().unwrap_or(&post.title);
    let description = post.meta_description.as_deref().or(post.excerpt.as_deref());
    let layout = Layout::new(site, Some(title), description, &path, &[seo::article(site, &post), crumbs]);
    HtmlTemplate(PostTemplate { layout, post, recent }).into_response()
}

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {
    layout: Layout,
    heading: String,
    intro: String,
    stats: Vec<CompanyStat>,
    team: Vec<TeamMember>,
}

pub async fn about(State(state): State<AppState>) -> Response {
    let (team, stats, copy) = tokio::join!(
        content::get_team_members(&state.db),
        content::get_company_stats(&state.db),
        content::get_page_content(&state.db, "about"),
    );
    let site = &state.config.site;
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("Hakkımızda", "/hakkimizda")]);
    let intro = text(&copy, "intro.text", "");
    let layout = Layout::new(site, Some("Hakkımızda"), Some(intro.as_str()), "/hakkimizda", &[crumbs]);
    HtmlTemplate(AboutTemplate {
        layout,
        heading: text(&copy, "intro.title", "Hakkımızda"),
        intro,
        stats,
        team,
    })
    .into_response()
}

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactTemplate {
    layout: Layout,
    intro: String,
    services: Vec<Service>,
    faqs: Vec<Faq>,
}

pub async fn contact(State(state): State<AppState>) -> Response {
    let (services, faqs, copy) = tokio::join!(
        content::get_services(&state.db),
        content::get_faqs(&state.db, None),
        content::get_page_content(&state.db, "contact"),
    );
    let site = &state.config.site;
    let crumbs = seo::breadcrumbs(site, &[("Ana Sayfa", "/"), ("İletişim", "/iletisim")]);
    let layout = Layout::new(
        site,
        Some("İletişim"),
        None,
        "/iletisim",
        &[crumbs, seo::faq_page(&faqs)],
    );
    HtmlTemplate(ContactTemplate {
        layout,
        intro: text(&copy, "intro.text", "Ücretsiz keşif ve fiyat teklifi için bize yazın."),
        services,
        faqs,
    })
    .into_response()
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    layout: Layout,
}

fn not_found_page(state: &AppState) -> Response {
    let layout = Layout::new(&state.config.site, Some("Sayfa bulunamadı"), None, "/", &[]);
    (StatusCode::NOT_FOUND, HtmlTemplate(NotFoundTemplate { layout })).into_response()
}

/// Router fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_page(&state)
}
