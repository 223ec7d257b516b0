//! `[cms]` section configuration.
//!
//! Connection settings for the Strapi instance. `STRAPI_URL` and
//! `STRAPI_API_TOKEN` override the file values.

use super::defaults;
use crate::cms::PayloadSchema;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[cms]` section in wardaya.toml.
///
/// # Example
/// ```toml
/// [cms]
/// url = "https://cms.example.com"
/// token_path = "~/.config/wardaya/strapi-token"
/// schema = "current"   # Strapi v5 flat records
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CmsConfig {
    /// Base URL of the CMS, without the API prefix.
    #[serde(default = "defaults::cms::url")]
    #[educe(Default = defaults::cms::url())]
    pub url: String,

    /// Bearer token for the CMS API. Empty means anonymous.
    #[serde(default = "defaults::cms::token")]
    #[educe(Default = defaults::cms::token())]
    pub token: String,

    /// File holding the bearer token. Read when `token` is empty.
    #[serde(default = "defaults::cms::token_path")]
    #[educe(Default = defaults::cms::token_path())]
    pub token_path: Option<PathBuf>,

    /// Path segment between the base URL and the endpoint.
    #[serde(default = "defaults::cms::api_prefix")]
    #[educe(Default = defaults::cms::api_prefix())]
    pub api_prefix: String,

    /// Response payload shape served by the CMS.
    #[serde(default = "defaults::cms::schema")]
    #[educe(Default = defaults::cms::schema())]
    pub schema: PayloadSchema,
}
