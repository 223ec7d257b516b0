//! Blocking Strapi REST client.

use super::{CmsError, FetchOptions};
use crate::config::CmsConfig;
use crate::log;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Maximum body bytes echoed into debug output.
const BODY_PREVIEW_LIMIT: usize = 256;

/// Thin wrapper over a shared `reqwest` client bound to one CMS origin.
///
/// Cheap to clone; all clones share the connection pool.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    api_prefix: String,
    token: String,
}

impl CmsClient {
    /// Build a client for `config`. Requests carry no timeout.
    pub fn new(config: &CmsConfig) -> Result<Self, CmsError> {
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(CmsError::Client)?;

        Ok(Self {
            http,
            base_url: config.url.clone(),
            api_prefix: config.api_prefix.clone(),
            token: config.token.clone(),
        })
    }

    /// CMS origin, used to absolutize media paths.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/{api_prefix}/{endpoint}` with exactly one `/` at each seam.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// GET `endpoint` and decode the JSON body as `T`.
    ///
    /// Failures are logged here, then returned.
    pub fn fetch_api<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &FetchOptions,
    ) -> Result<T, CmsError> {
        let result = self.send(endpoint, options);
        if let Err(err) = &result {
            log!("cms"; "error fetching from strapi: {}", super::error_chain(err));
        }
        result
    }

    fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: &FetchOptions,
    ) -> Result<T, CmsError> {
        let url = self.endpoint_url(endpoint);
        let response = self
            .http
            .get(&url)
            .query(&options.params)
            .headers(self.headers(options)?)
            .send()
            .map_err(|source| map_transport_error(endpoint, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                endpoint: endpoint.to_owned(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .map_err(|source| map_transport_error(endpoint, source))?;

        serde_json::from_slice(&body).map_err(|source| {
            log!("cms"; "undecodable body from {endpoint}: {}", body_preview(&body));
            CmsError::Decode {
                endpoint: endpoint.to_owned(),
                source,
            }
        })
    }

    /// Defaults first, then caller headers replacing same-named entries.
    fn headers(&self, options: &FetchOptions) -> Result<HeaderMap, CmsError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if !self.token.is_empty() {
            let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| CmsError::Header(AUTHORIZATION.to_string()))?;
            headers.insert(AUTHORIZATION, bearer);
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| CmsError::Header(name.clone()))?;
            let value =
                HeaderValue::from_str(value).map_err(|_| CmsError::Header(name.to_string()))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

fn map_transport_error(endpoint: &str, source: reqwest::Error) -> CmsError {
    CmsError::Transport {
        endpoint: endpoint.to_owned(),
        source,
    }
}

fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    crate::logger::truncate_str(&text, BODY_PREVIEW_LIMIT).to_owned()
}
