//! Structured data (schema.org JSON-LD), sitemap, and robots.txt.

use crate::config::SiteInfo;
use crate::models::{BlogPost, Faq, Service};
use serde_json::{json, Map, Value};

const CONTEXT: &str = "https://schema.org";

fn absolute(site: &SiteInfo, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}/{}", site.url, path.trim_start_matches('/'))
    }
}

/// `LocalBusiness` describing the company itself.
pub fn organization(site: &SiteInfo) -> Value {
    let mut v = Map::new();
    v.insert("@context".into(), json!(CONTEXT));
    v.insert("@type".into(), json!("LocalBusiness"));
    v.insert("@id".into(), json!(format!("{}/#organization", site.url)));
    v.insert("name".into(), json!(site.name));
    v.insert("url".into(), json!(site.url));
    if let Some(phone) = &site.phone {
        v.insert("telephone".into(), json!(phone));
    }
    if let Some(email) = &site.email {
        v.insert("email".into(), json!(email));
    }
    if let Some(address) = &site.address {
        v.insert(
            "address".into(),
            json!({ "@type": "PostalAddress", "streetAddress": address, "addressCountry": "TR" }),
        );
    }
    Value::Object(v)
}

pub fn service(site: &SiteInfo, s: &Service) -> Value {
    let mut v = json!({
        "@context": CONTEXT,
        "@type": "Service",
        "name": s.title,
        "url": absolute(site, &format!("/hizmetler/{}", s.slug)),
        "provider": { "@id": format!("{}/#organization", site.url) },
        "areaServed": "TR",
    });
    if let Some(d) = s.short_description.as_ref().or(s.description.as_ref()) {
        v["description"] = json!(d);
    }
    if let Some(img) = &s.image_url {
        v["image"] = json!(absolute(site, img));
    }
    v
}

/// `BlogPosting` for a published post.
pub fn article(site: &SiteInfo, post: &BlogPost) -> Value {
    let mut v = json!({
        "@context": CONTEXT,
        "@type": "BlogPosting",
        "headline": post.meta_title.as_deref().unwrap_or(&post.title),
        "url": absolute(site, &format!("/blog/{}", post.slug)),
        "mainEntityOfPage": absolute(site, &format!("/blog/{}", post.slug)),
        "publisher": { "@type": "Organization", "name": site.name },
        "author": {
            "@type": "Person",
            "name": post.author.as_deref().unwrap_or(&site.name),
        },
    });
    if let Some(d) = post.meta_description.as_ref().or(post.excerpt.as_ref()) {
        v["description"] = json!(d);
    }
    if let Some(img) = &post.cover_image {
        v["image"] = json!(absolute(site, img));
    }
    if let Some(p) = &post.published_at {
        v["datePublished"] = json!(p);
    }
    if let Some(u) = post.updated_at.as_ref().or(post.published_at.as_ref()) {
        v["dateModified"] = json!(u);
    }
    if !post.tags.is_empty() {
        v["keywords"] = json!(post.tags.join(", "));
    }
    v
}

/// `BreadcrumbList` from `(name, path)` pairs, root first.
pub fn breadcrumbs(site: &SiteInfo, trail: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = trail
        .iter()
        .enumerate()
        .map(|(i, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": absolute(site, path),
            })
        })
        .collect();
    json!({ "@context": CONTEXT, "@type": "BreadcrumbList", "itemListElement": items })
}

pub fn faq_page(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|f| {
            json!({
                "@type": "Question",
                "name": f.question,
                "acceptedAnswer": { "@type": "Answer", "text": f.answer },
            })
        })
        .collect();
    json!({ "@context": CONTEXT, "@type": "FAQPage", "mainEntity": entities })
}

/// `<script type="application/ld+json">` block. `</` is escaped so content cannot close the tag.
pub fn script_tag(data: &Value) -> String {
    let body = data.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, body)
}

/// Several JSON-LD blocks, skipping empty FAQ lists.
pub fn script_tags(blocks: &[Value]) -> String {
    blocks
        .iter()
        .filter(|b| {
            b.get("mainEntity")
                .and_then(Value::as_array)
                .map_or(true, |a| !a.is_empty())
        })
        .map(script_tag)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone, Debug, PartialEq)]
pub struct SitemapEntry {
    pub path: String,
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    pub fn new(path: impl Into<String>, lastmod: Option<&str>) -> Self {
        SitemapEntry {
            path: path.into(),
            // only the date part is meaningful to crawlers
            lastmod: lastmod.and_then(|s| s.get(..10)).map(str::to_string),
        }
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn sitemap_xml(site: &SiteInfo, entries: &[SitemapEntry]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for e in entries {
        out.push_str("  <url><loc>");
        out.push_str(&escape_xml(&absolute(site, &e.path)));
        out.push_str("</loc>");
        if let Some(m) = &e.lastmod {
            out.push_str("<lastmod>");
            out.push_str(&escape_xml(m));
            out.push_str("</lastmod>");
        }
        out.push_str("</url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

pub fn robots_txt(site: &SiteInfo) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /api/\n\nSitemap: {}/sitemap.xml\n",
        site.url
    )
}
