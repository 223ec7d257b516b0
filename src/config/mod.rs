//! Site configuration management for `wardaya.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[site]`    | Public site identity (url, name, description)   |
//! | `[cms]`     | Strapi endpoint, token, payload schema          |
//! | `[build]`   | Output paths, search index, sitemap             |
//! | `[serve]`   | Development server (interface, port)            |
//!
//! # Precedence
//!
//! defaults < `wardaya.toml` < CLI flags < environment (`STRAPI_*`, `PUBLIC_SITE_*`)
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://wardayahub.vercel.app"
//!
//! [cms]
//! url = "https://cms.example.com"
//! schema = "legacy"
//!
//! [build]
//! output = "dist"
//! ```

mod build;
mod cms;
pub mod defaults;
pub mod env;
mod error;
mod handle;
mod serve;
mod site;

pub use cms::CmsConfig;
pub use error::ConfigError;
pub use handle::{cfg, init_config};

use build::BuildConfig;
use serve::ServeConfig;
use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing wardaya.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Public site identity
    #[serde(default)]
    pub site: SiteSection,

    /// CMS connection
    #[serde(default)]
    pub cms: CmsConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        Self::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load, override and validate the configuration for a CLI invocation.
    ///
    /// A missing config file is not an error: the environment alone can
    /// configure a build.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.update_with_cli(cli);
        env::apply_process_env(&mut config);
        config.validate()?;
        config.resolve_token()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Absolute path of the exported search index.
    pub fn search_index_path(&self) -> PathBuf {
        self.build.output.join(&self.build.search_index)
    }

    /// Absolute path of the data snapshot directory.
    pub fn data_dir(&self) -> PathBuf {
        self.build.output.join(&self.build.data)
    }

    /// Absolute path of the sitemap.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.build.sitemap.path)
    }

    /// URL path (leading `/`) under which the search index is served.
    pub fn search_index_route(&self) -> String {
        let relative = self.build.search_index.to_string_lossy().replace('\\', "/");
        format!("/{}", relative.trim_start_matches('/'))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        self.update_path_with_root(cli, &root);

        Self::update_option(&mut self.cms.url, cli.cms_url.as_ref());

        match &cli.command {
            Commands::Build { clean, sitemap } => {
                self.build.clean |= *clean;
                Self::update_option(&mut self.build.sitemap.enable, sitemap.as_ref());
            }
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Search { .. } => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));

        // Normalize token path (with tilde expansion)
        if let Some(token_path) = &self.cms.token_path {
            let expanded = shellexpand::tilde(&token_path.to_string_lossy()).into_owned();
            let path = PathBuf::from(expanded);
            self.cms.token_path = Some(if path.is_relative() {
                Self::normalize_path(&root.join(path))
            } else {
                Self::normalize_path(&path)
            });
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Read the bearer token from `[cms].token_path` when no token is set.
    fn resolve_token(&mut self) -> Result<()> {
        if !self.cms.token.is_empty() {
            return Ok(());
        }
        if let Some(path) = &self.cms.token_path {
            let token = fs::read_to_string(path)
                .map_err(|err| ConfigError::Token(path.clone(), err))?;
            self.cms.token = token.trim().to_owned();
        }
        Ok(())
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        Self::check_http_url("cms", &self.cms.url)?;
        Self::check_http_url("site", &self.site.url)?;

        if self.cms.api_prefix.trim_matches('/').is_empty() {
            bail!(ConfigError::invalid("cms", "api_prefix", "must not be empty"));
        }

        if self.cms.token.is_empty()
            && let Some(path) = &self.cms.token_path
        {
            if !path.exists() {
                bail!(ConfigError::invalid("cms", "token_path", "not found"));
            }
            if !path.is_file() {
                bail!(ConfigError::invalid("cms", "token_path", "is not a file"));
            }
        }

        Ok(())
    }

    fn check_http_url(section: &'static str, url: &str) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(ConfigError::invalid(section, "url", "must start with http:// or https://"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
