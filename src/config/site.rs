//! `[site]` section configuration.
//!
//! Public site identity, mirrored by the `PUBLIC_SITE_*` environment keys.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[site]` section in wardaya.toml - public site metadata.
///
/// # Example
/// ```toml
/// [site]
/// url = "https://wardayahub.vercel.app"
/// name = "WardayaHub"
/// description = "Stories and notes"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Public site URL, used for absolute links in the sitemap
    /// and as the default search index location.
    #[serde(default = "defaults::site::url")]
    #[educe(Default = defaults::site::url())]
    pub url: String,

    /// Site name, written to `site.json` for page templates.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    /// Site description, written to `site.json` for page templates.
    #[serde(default = "defaults::site::description")]
    #[educe(Default = defaults::site::description())]
    pub description: String,
}
