//! Site building orchestration.
//!
//! Pulls content from the CMS and writes everything the page renderer and
//! the browser consume.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── rayon::join(get_all_post_slugs, get_categories)
//!     │
//!     ├── rayon::join
//!     │       ├── per slug: get_post_by_slug       → _data/posts/{slug}.json
//!     │       └── per category: category + posts   → _data/categories/{slug}.json
//!     │
//!     ├── get_posts (first page)                   → _data/posts.json
//!     ├── categories                               → _data/categories.json
//!     ├── [site]                                   → _data/site.json
//!     ├── export_index                             → search.json
//!     └── build_sitemap                            → sitemap.xml
//! ```
//!
//! CMS failures never abort the build; they shrink the output instead.
//! Filesystem failures do abort it.

use crate::{
    config::SiteConfig,
    content::{Blog, Category, Post},
    generator::sitemap::build_sitemap,
    log,
    logger::ProgressBars,
    search::export_index,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

const POSTS_DIR: &str = "posts";
const CATEGORIES_DIR: &str = "categories";

/// Snapshot written per category page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySnapshot {
    pub category: Option<Category>,
    pub posts: Vec<Post>,
}

/// Counts reported after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub categories: usize,
    /// Whether `search.json` holds an index rather than an error object.
    pub index_ok: bool,
}

/// Build the site data from the CMS.
///
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let output = &config.build.output;
    ensure_output(output, config.build.clean)?;

    let blog = Blog::from_config(&config.cms).context("Failed to create CMS client")?;
    log!("build"; "fetching content from {}", config.cms.url);

    let (slugs, categories) = rayon::join(|| blog.get_all_post_slugs(), || blog.get_categories());
    log!("build"; "found {} posts, {} categories", slugs.len(), categories.len());

    let data_dir = config.data_dir();
    for dir in [data_dir.join(POSTS_DIR), data_dir.join(CATEGORIES_DIR)] {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    }

    let progress =
        ProgressBars::new_filtered(&[("posts", slugs.len()), ("categories", categories.len())]);
    let bump = |name: &str| {
        if let Some(progress) = &progress {
            progress.inc_by_name(name);
        }
    };
    let has_error = AtomicBool::new(false);

    let (posts_result, categories_result) = rayon::join(
        || {
            slugs
                .par_iter()
                .map(|slug| {
                    if has_error.load(Ordering::Relaxed) {
                        return Err(anyhow!("Aborted"));
                    }
                    let post = write_post_snapshot(&blog, &data_dir, slug).map_err(|e| {
                        if !has_error.swap(true, Ordering::Relaxed) {
                            log!("error"; "{slug}: {:#}", e);
                        }
                        anyhow!("Build failed")
                    })?;
                    bump("posts");
                    Ok(post)
                })
                .collect::<Result<Vec<_>>>()
        },
        || {
            categories.par_iter().try_for_each(|category| {
                if has_error.load(Ordering::Relaxed) {
                    return Err(anyhow!("Aborted"));
                }
                if let Err(e) = write_category_snapshot(&blog, &data_dir, &category.slug) {
                    if !has_error.swap(true, Ordering::Relaxed) {
                        log!("error"; "{}: {:#}", category.slug, e);
                    }
                    return Err(anyhow!("Build failed"));
                }
                bump("categories");
                Ok(())
            })
        },
    );

    if let Some(progress) = &progress {
        progress.finish();
    }

    let posts: Vec<Post> = posts_result?.into_iter().flatten().collect();
    categories_result?;

    write_json(&data_dir.join("posts.json"), &blog.get_posts(None, None))?;
    write_json(&data_dir.join("categories.json"), &categories)?;
    write_json(&data_dir.join("site.json"), &config.site)?;

    let index = export_index(&blog);
    let index_path = config.search_index_path();
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&index_path, &index.body)
        .with_context(|| format!("Failed to write search index {}", index_path.display()))?;
    if index.is_ok() {
        log!("search"; "{}", index_path.display());
    } else {
        log!("warn"; "search index unavailable, wrote error document to {}", index_path.display());
    }

    build_sitemap(config, &posts, &categories)?;

    let report = BuildReport {
        posts: posts.len(),
        categories: categories.len(),
        index_ok: index.is_ok(),
    };
    log_build_result(&config.site.name, &report);
    Ok(report)
}

/// Create the output directory, removing existing content when `clean`.
fn ensure_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// A slug usable as one file name.
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

fn write_post_snapshot(blog: &Blog, data_dir: &Path, slug: &str) -> Result<Option<Post>> {
    if !is_safe_slug(slug) {
        log!("warn"; "skipping post with unusable slug {slug:?}");
        return Ok(None);
    }
    let Some(post) = blog.get_post_by_slug(slug) else {
        log!("warn"; "post {slug} disappeared during build");
        return Ok(None);
    };
    write_json(&data_dir.join(POSTS_DIR).join(format!("{slug}.json")), &post)?;
    Ok(Some(post))
}

fn write_category_snapshot(blog: &Blog, data_dir: &Path, slug: &str) -> Result<()> {
    if !is_safe_slug(slug) {
        log!("warn"; "skipping category with unusable slug {slug:?}");
        return Ok(());
    }
    let (category, posts) = rayon::join(
        || blog.get_category_by_slug(slug),
        || blog.get_posts_by_category(slug),
    );
    let path = data_dir.join(CATEGORIES_DIR).join(format!("{slug}.json"));
    write_json(&path, &CategorySnapshot { category, posts })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn log_build_result(site_name: &str, report: &BuildReport) {
    if report.posts == 0 {
        log!("warn"; "no posts were written, check the CMS connection");
    } else {
        log!("build"; "{site_name} done ({} posts, {} categories)", report.posts, report.categories);
    }
}
