//! Environment overrides.
//!
//! The deployment environment owns the CMS endpoint, its credential and the
//! public site identity. Unset or empty variables leave the file value alone.

use super::SiteConfig;

pub const STRAPI_URL: &str = "STRAPI_URL";
pub const STRAPI_API_TOKEN: &str = "STRAPI_API_TOKEN";
pub const PUBLIC_SITE_URL: &str = "PUBLIC_SITE_URL";
pub const PUBLIC_SITE_NAME: &str = "PUBLIC_SITE_NAME";
pub const PUBLIC_SITE_DESCRIPTION: &str = "PUBLIC_SITE_DESCRIPTION";

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut SiteConfig) {
    apply(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup, e.g. a map in tests.
pub fn apply(config: &mut SiteConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = get(STRAPI_URL) {
        config.cms.url = url;
    }
    if let Some(token) = get(STRAPI_API_TOKEN) {
        config.cms.token = token;
    }
    if let Some(url) = get(PUBLIC_SITE_URL) {
        config.site.url = url;
    }
    if let Some(name) = get(PUBLIC_SITE_NAME) {
        config.site.name = name;
    }
    if let Some(description) = get(PUBLIC_SITE_DESCRIPTION) {
        config.site.description = description;
    }
}
