//! Normalized blog entities.
//!
//! These are what pages, snapshots and the search index consume. They never
//! carry Strapi's `data`/`attributes` nesting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Absolute URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub slug: String,
    /// Markdown body; empty when the CMS sent none.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Absolute URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Page metadata as reported by the CMS.
///
/// Missing keys decode as zero; offset-style responses omit `page`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

/// One page of posts. `Default` is the empty page returned on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    pub posts: Vec<Post>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_serializes_camel_case_without_absent_fields() {
        let post = Post {
            id: 1,
            title: "Hello".into(),
            slug: "hello".into(),
            content: String::new(),
            excerpt: None,
            cover_image: Some("http://cms/uploads/a.png".into()),
            published_at: "2024-01-01T00:00:00Z".into(),
            updated_at: None,
            author: None,
            category: None,
            tags: None,
        };

        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({
                "id": 1,
                "title": "Hello",
                "slug": "hello",
                "content": "",
                "coverImage": "http://cms/uploads/a.png",
                "publishedAt": "2024-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn test_pagination_tolerates_missing_keys() {
        let pagination: Pagination =
            serde_json::from_value(json!({ "start": 0, "limit": 100, "total": 4 })).unwrap();
        assert_eq!(pagination.total, 4);
        assert_eq!(pagination.page, 0);
    }

    #[test]
    fn test_empty_page_has_no_pagination() {
        let page = PostsPage::default();
        assert!(page.posts.is_empty());
        assert_eq!(serde_json::to_value(&page).unwrap(), json!({ "posts": [] }));
    }
}
