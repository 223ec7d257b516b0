//! Strapi wire formats.
//!
//! Strapi has shipped two response shapes for the same content types:
//!
//! - [`PayloadSchema::Legacy`] (v4): every record is `{ id, attributes: {..} }`
//!   and every relation is wrapped as `{ data: record | null }`
//! - [`PayloadSchema::Current`] (v5): records are flat and relations inline
//!
//! Each shape gets its own DTO module; both normalize into the same
//! [`crate::content`] entities. The collection envelope is shared.

pub mod current;
pub mod legacy;

use crate::content::Pagination;
use serde::{Deserialize, Serialize};

/// Which Strapi response shape to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadSchema {
    #[default]
    Legacy,
    Current,
}

/// `{ "data": ..., "meta": { "pagination": ... } }`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    pub fn pagination(&self) -> Option<Pagination> {
        self.meta.as_ref().and_then(|meta| meta.pagination)
    }
}

impl<T> Envelope<Vec<T>> {
    /// Normalize every record, keeping CMS order and page metadata.
    pub fn normalize<U>(self, f: impl FnMut(T) -> U) -> (Vec<U>, Option<Pagination>) {
        let pagination = self.pagination();
        (self.data.into_iter().map(f).collect(), pagination)
    }
}
