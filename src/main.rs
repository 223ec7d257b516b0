//! Wardaya - a front end for a Strapi-backed blog.
//!
//! Fetches posts and categories from the CMS, writes data snapshots, the
//! search index and the sitemap, previews the output, and searches the index.

mod build;
mod cli;
mod cms;
mod config;
mod content;
mod generator;
mod logger;
mod search;
mod serve;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{SiteConfig, cfg, init_config};
use search::{IndexSource, console};
use serve::serve_site;
use std::io;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    init_config(SiteConfig::load(cli)?);

    match &cli.command {
        Commands::Build { .. } => build_site(&cfg()).map(|_| ()),
        Commands::Serve { .. } => {
            build_site(&cfg())?;
            serve_site()
        }
        Commands::Search { query, index } => search_site(query, index.as_deref()),
    }
}

/// Search the published index from the terminal.
fn search_site(query: &[String], index: Option<&str>) -> Result<()> {
    let c = cfg();
    let source = index.map_or_else(|| default_index_source(&c), IndexSource::parse);
    let query = (!query.is_empty()).then(|| query.join(" "));

    console::run(&source, query.as_deref(), io::stdin().lock(), &mut io::stdout())
}

/// The built index file if present, otherwise the site's served index.
fn default_index_source(config: &SiteConfig) -> IndexSource {
    let path = config.search_index_path();
    if path.is_file() {
        IndexSource::Path(path)
    } else {
        IndexSource::Url(format!(
            "{}{}",
            config.site.url.trim_end_matches('/'),
            config.search_index_route()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_index_source_prefers_built_file() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.output = dir.path().to_path_buf();
        config.site.url = "https://blog.example.com/".into();

        assert_eq!(
            default_index_source(&config),
            IndexSource::Url("https://blog.example.com/search.json".into())
        );

        fs::write(config.search_index_path(), "[]").unwrap();
        assert_eq!(
            default_index_source(&config),
            IndexSource::Path(dir.path().join("search.json"))
        );
    }
}
