//! Sitemap generation.
//!
//! Lists the home page, every post and every category page.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    content::{Category, Post},
    log,
};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::{fs, path::Path};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, posts: &[Post], categories: &[Category]) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::from_content(&config.site.url, posts, categories);
        sitemap.write(&config.sitemap_path())?;
    }
    Ok(())
}

/// Sitemap data structure
struct Sitemap {
    urls: Vec<UrlEntry>,
}

/// Single URL entry in the sitemap
struct UrlEntry {
    /// Full URL location
    loc: String,
    /// YYYY-MM-DD
    lastmod: Option<String>,
}

impl Sitemap {
    fn from_content(site_url: &str, posts: &[Post], categories: &[Category]) -> Self {
        let base = site_url.trim_end_matches('/');
        let page = |path: String, lastmod: Option<String>| UrlEntry {
            loc: format!("{base}{path}"),
            lastmod,
        };

        let mut urls = Vec::with_capacity(1 + posts.len() + categories.len());
        urls.push(page("/".to_owned(), None));
        urls.extend(
            posts
                .iter()
                .map(|post| page(format!("/blog/{}", post.slug), lastmod_ymd(post))),
        );
        urls.extend(
            categories
                .iter()
                .map(|category| page(format!("/category/{}", category.slug), None)),
        );

        Self { urls }
    }

    /// Generate sitemap XML string.
    fn into_xml(self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::with_capacity(4096), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
        ))?;

        for entry in self.urls {
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(lastmod) = &entry.lastmod {
                write_text_element(&mut writer, "lastmod", lastmod)?;
            }
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut xml = String::from_utf8(writer.into_inner()).context("sitemap is not UTF-8")?;
        xml.push('\n');
        Ok(xml)
    }

    /// Write sitemap to output file.
    fn write(self, path: &Path) -> Result<()> {
        let count = self.urls.len();
        let xml = self.into_xml()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, xml)
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;

        log!("sitemap"; "{} ({count} urls)", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(())
    }
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Date part of `updatedAt`, falling back to `publishedAt`.
fn lastmod_ymd(post: &Post) -> Option<String> {
    let stamp = post.updated_at.as_deref().unwrap_or(&post.published_at);
    if let Ok(time) = DateTime::parse_from_rfc3339(stamp) {
        return Some(time.format("%Y-%m-%d").to_string());
    }
    // Date-only values
    let date = NaiveDate::parse_from_str(stamp.get(..10)?, "%Y-%m-%d").ok()?;
    Some(date.format("%Y-%m-%d").to_string())
}
