//! Configuration error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Read(PathBuf, #[source] io::Error),

    /// `[cms] token_path` exists but could not be read.
    #[error("cannot read CMS token from `{0}`")]
    Token(PathBuf, #[source] io::Error),

    #[error("invalid wardaya.toml")]
    Toml(#[from] toml::de::Error),

    /// A field that parsed but cannot be used, named as `[section.field]`.
    #[error("[{section}.{field}] {reason}")]
    Invalid {
        section: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(section: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            section,
            field,
            reason: reason.into(),
        }
    }
}
