//! Search index export.
//!
//! The index is a flat JSON array of post summaries. The same document is
//! written by `build` and answered live by `serve`.

use crate::content::{Blog, Post};
use serde::{Deserialize, Serialize};

/// Upper bound on posts pulled into the index.
pub const SEARCH_INDEX_LIMIT: u32 = 1000;

const EXPORT_FAILED: &str = "Failed to generate search index";

/// Projection of a [`Post`] used only for search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexEntry {
    pub title: String,
    pub slug: String,
    /// Post excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub published_at: String,
}

impl From<&Post> for SearchIndexEntry {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            description: post.excerpt.clone(),
            category: post.category.as_ref().map(|c| c.name.clone()),
            published_at: post.published_at.clone(),
        }
    }
}

/// A rendered index response: HTTP status plus JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub status: u16,
    pub body: String,
}

impl IndexDocument {
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    fn failed() -> Self {
        Self {
            status: 500,
            body: serde_json::json!({ "error": EXPORT_FAILED }).to_string(),
        }
    }
}

/// Serialize entries as the index body.
fn render_entries(entries: &[SearchIndexEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

/// Fetch up to [`SEARCH_INDEX_LIMIT`] posts and render the index.
///
/// A failed fetch yields status 500 with `{"error": ...}` rather than an
/// empty array, so consumers can tell "no posts" from "no index".
pub fn export_index(blog: &Blog) -> IndexDocument {
    let page = match blog.try_get_posts(Some(1), Some(SEARCH_INDEX_LIMIT)) {
        Ok(page) => page,
        Err(err) => {
            crate::log!("search"; "error generating search index: {}", crate::cms::error_chain(&err));
            return IndexDocument::failed();
        }
    };

    let entries: Vec<SearchIndexEntry> = page.posts.iter().map(SearchIndexEntry::from).collect();
    match render_entries(&entries) {
        Ok(body) => IndexDocument { status: 200, body },
        Err(err) => {
            crate::log!("search"; "error serializing search index: {err}");
            IndexDocument::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::PayloadSchema;
    use crate::cms::stub::{StubCms, envelope, legacy_post};
    use serde_json::{Value, json};

    #[test]
    fn test_entry_projects_post() {
        let stub = StubCms::json(json!({ "data": [legacy_post(1, "hello", "Hello", "Rust")] }));
        let blog = Blog::from_config(&stub.config(PayloadSchema::Legacy)).unwrap();
        let post = blog.get_post_by_slug("hello").unwrap();

        assert_eq!(
            SearchIndexEntry::from(&post),
            SearchIndexEntry {
                title: "Hello".into(),
                slug: "hello".into(),
                description: Some("About Hello".into()),
                category: Some("Rust".into()),
                published_at: "2024-03-01T10:00:00.000Z".into(),
            }
        );
    }

    #[test]
    fn test_export_requests_limit_and_renders_array() {
        let stub = StubCms::json(envelope(
            vec![legacy_post(1, "a", "A", "Rust"), legacy_post(2, "b", "B", "Go")],
            1,
            SEARCH_INDEX_LIMIT,
            2,
        ));
        let blog = Blog::from_config(&stub.config(PayloadSchema::Legacy)).unwrap();
        let document = export_index(&blog);

        assert!(document.is_ok());
        let body: Value = serde_json::from_str(&document.body).unwrap();
        assert_eq!(body[0]["slug"], "a");
        assert_eq!(body[1]["category"], "Go");
        assert_eq!(body[0]["publishedAt"], "2024-03-01T10:00:00.000Z");
        assert!(stub.requests()[0].url.contains("pagination[page]=1&pagination[pageSize]=1000"));
    }

    #[test]
    fn test_export_without_posts_is_empty_array() {
        let stub = StubCms::json(json!({ "data": [] }));
        let blog = Blog::from_config(&stub.config(PayloadSchema::Legacy)).unwrap();

        assert_eq!(export_index(&blog), IndexDocument { status: 200, body: "[]".into() });
    }

    #[test]
    fn test_export_failure_is_500_error_object() {
        let stub = StubCms::start(|_| (502, String::new()));
        let blog = Blog::from_config(&stub.config(PayloadSchema::Legacy)).unwrap();
        let document = export_index(&blog);

        assert_eq!(document.status, 500);
        let body: Value = serde_json::from_str(&document.body).unwrap();
        assert_eq!(body, json!({ "error": "Failed to generate search index" }));
    }

    #[test]
    fn test_uncategorized_post_omits_category() {
        let entry = SearchIndexEntry {
            title: "T".into(),
            slug: "t".into(),
            description: None,
            category: None,
            published_at: "2024-01-01".into(),
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "title": "T", "slug": "t", "publishedAt": "2024-01-01" })
        );
    }
}
