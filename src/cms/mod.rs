//! Strapi CMS access.
//!
//! - `client`: blocking HTTP transport ([`CmsClient::fetch_api`])
//! - `options`: Strapi query-string builder ([`FetchOptions`])
//! - `payload`: wire DTOs for both Strapi payload generations and their
//!   normalization into [`crate::content`] entities

mod client;
mod error;
mod options;
pub mod payload;

#[cfg(test)]
pub(crate) mod stub;

pub use client::CmsClient;
pub use error::{CmsError, error_chain};
pub use options::FetchOptions;
pub use payload::{Envelope, PayloadSchema};
