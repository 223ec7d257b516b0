//! Loading a published search index.

use super::SearchIndexEntry;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Non-200 response, or a body that is not an array of entries.
    #[error("search index unavailable: {0}")]
    Unavailable(String),

    #[error("failed to fetch search index")]
    Transport(#[from] reqwest::Error),

    #[error("failed to read search index `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where to read the index from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    Url(String),
    Path(PathBuf),
}

impl IndexSource {
    /// `http(s)://...` is a URL, anything else a filesystem path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_owned())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn load_index(source: &IndexSource) -> Result<Vec<SearchIndexEntry>, IndexError> {
    let body = match source {
        IndexSource::Url(url) => {
            let response = reqwest::blocking::get(url)?;
            let status = response.status();
            if status != reqwest::StatusCode::OK {
                return Err(IndexError::Unavailable(format!("{url} returned {status}")));
            }
            response.text()?
        }
        IndexSource::Path(path) => fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.clone(),
            source,
        })?,
    };
    parse_index(&body)
}

/// Decode an index body. Error objects and malformed JSON are both unavailable.
fn parse_index(body: &str) -> Result<Vec<SearchIndexEntry>, IndexError> {
    serde_json::from_str(body).map_err(|err| IndexError::Unavailable(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::stub::{StubCms, unreachable_base_url};
    use serde_json::json;
    use tempfile::TempDir;

    const INDEX: &str = r#"[{"title":"Hello","slug":"hello","publishedAt":"2024-01-01"}]"#;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            IndexSource::parse("http://localhost:4321/search.json"),
            IndexSource::Url("http://localhost:4321/search.json".into())
        );
        assert_eq!(
            IndexSource::parse("dist/search.json"),
            IndexSource::Path("dist/search.json".into())
        );
    }

    #[test]
    fn test_load_from_url() {
        let stub = StubCms::start(|_| (200, INDEX.to_owned()));
        let source = IndexSource::Url(format!("{}/search.json", stub.base_url));

        let entries = load_index(&source).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slug, "hello");
    }

    #[test]
    fn test_error_status_is_unavailable() {
        let stub = StubCms::start(|_| {
            (500, json!({ "error": "Failed to generate search index" }).to_string())
        });
        let source = IndexSource::Url(format!("{}/search.json", stub.base_url));

        assert!(matches!(load_index(&source), Err(IndexError::Unavailable(_))));
    }

    #[test]
    fn test_error_object_with_200_is_unavailable() {
        let stub = StubCms::start(|_| (200, r#"{"error":"nope"}"#.to_owned()));
        let source = IndexSource::Url(format!("{}/search.json", stub.base_url));

        assert!(matches!(load_index(&source), Err(IndexError::Unavailable(_))));
    }

    #[test]
    fn test_unreachable_is_transport() {
        let source = IndexSource::Url(format!("{}/search.json", unreachable_base_url()));
        assert!(matches!(load_index(&source), Err(IndexError::Transport(_))));
    }

    #[test]
    fn test_load_from_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search.json");
        fs::write(&path, INDEX).unwrap();

        let entries = load_index(&IndexSource::Path(path)).unwrap();
        assert_eq!(entries[0].title, "Hello");
    }

    #[test]
    fn test_missing_file_is_io() {
        let dir = TempDir::new().unwrap();
        let source = IndexSource::Path(dir.path().join("absent.json"));

        assert!(matches!(load_index(&source), Err(IndexError::Io { .. })));
    }
}
