//! sitemap.xml generated from the post corpus

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::fmt::Write;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::content::PostMetadata;
use crate::helpers::date::parse_date;

pub async fn sitemap(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let posts = state.repo.get_all_metadata().await;
    let xml = build(&state.site_url, &posts)?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

/// Home and blog index first, then one entry per post with its publication
/// date as lastmod.
fn build(site_url: &str, posts: &[PostMetadata]) -> Result<String, std::fmt::Error> {
    let base = site_url.trim_end_matches('/');

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    write_url(&mut xml, &format!("{base}/"), None, "weekly", "1.0")?;
    write_url(&mut xml, &format!("{base}/blog"), None, "weekly", "0.8")?;

    for post in posts {
        let lastmod = parse_date(&post.date).map(|d| d.format("%Y-%m-%d").to_string());
        write_url(
            &mut xml,
            &format!("{base}/blog/{}", post.slug),
            lastmod.as_deref(),
            "monthly",
            "0.7",
        )?;
    }

    xml.push_str("</urlset>\n");
    Ok(xml)
}

fn write_url(
    xml: &mut String,
    loc: &str,
    lastmod: Option<&str>,
    changefreq: &str,
    priority: &str,
) -> Result<(), std::fmt::Error> {
    writeln!(xml, "  <url>")?;
    writeln!(xml, "    <loc>{loc}</loc>")?;
    if let Some(lastmod) = lastmod {
        writeln!(xml, "    <lastmod>{lastmod}</lastmod>")?;
    }
    writeln!(xml, "    <changefreq>{changefreq}</changefreq>")?;
    writeln!(xml, "    <priority>{priority}</priority>")?;
    writeln!(xml, "  </url>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(slug: &str, date: &str) -> PostMetadata {
        PostMetadata {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: date.to_string(),
            excerpt: String::new(),
            tags: Vec::new(),
            featured: false,
            image: None,
            reading_time: "1 min read".to_string(),
        }
    }

    #[test]
    fn test_build_lists_static_routes_and_posts() {
        let posts = vec![meta("hello-world", "2024-06-15"), meta("older", "2023-12-01")];
        let xml = build("https://example.com/", &posts).unwrap();

        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog</loc>"));
        assert!(xml.contains("<loc>https://example.com/blog/hello-world</loc>"));
        assert!(xml.contains("<lastmod>2024-06-15</lastmod>"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn test_unparseable_date_omits_lastmod() {
        let posts = vec![meta("undated", "")];
        let xml = build("https://example.com", &posts).unwrap();
        assert!(xml.contains("<loc>https://example.com/blog/undated</loc>"));
        assert!(!xml.contains("<lastmod>"));
    }
}
