//! Blog content operations over the CMS.
//!
//! Every public read has a `try_*` twin that surfaces [`CmsError`]. The public
//! form goes through [`OrEmpty::or_empty`], which logs the failure and
//! substitutes the type's empty value (`[]`, `None`, or an empty page), so
//! page generation never aborts on CMS trouble.

use super::{Category, Pagination, Post, PostsPage};
use crate::cms::payload::{current, legacy};
use crate::cms::{CmsClient, CmsError, Envelope, FetchOptions, PayloadSchema, error_chain};
use crate::config::CmsConfig;
use crate::log;

const POSTS: &str = "/posts";
const CATEGORIES: &str = "/categories";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Page size used when enumerating slugs.
pub const SLUG_PAGE_SIZE: u32 = 100;

const NEWEST_FIRST: &str = "publishedAt:desc";
const BY_NAME: &str = "name:asc";

/// Explicit fallback from a failed CMS read to an empty value.
pub trait OrEmpty<T> {
    fn or_empty(self, context: &str) -> T;
}

impl<T: Default> OrEmpty<T> for Result<T, CmsError> {
    fn or_empty(self, context: &str) -> T {
        self.unwrap_or_else(|err| {
            log!("error"; "{context}: {}", error_chain(&err));
            T::default()
        })
    }
}

/// Read-only view of the blog's posts and categories.
#[derive(Debug, Clone)]
pub struct Blog {
    client: CmsClient,
    schema: PayloadSchema,
}

impl Blog {
    pub fn new(client: CmsClient, schema: PayloadSchema) -> Self {
        Self { client, schema }
    }

    pub fn from_config(config: &CmsConfig) -> Result<Self, CmsError> {
        Ok(Self::new(CmsClient::new(config)?, config.schema))
    }

    // ========================================================================
    // Public operations
    // ========================================================================

    /// Newest-first page of posts. `None` arguments use page 1, size 10.
    pub fn get_posts(&self, page: Option<u32>, page_size: Option<u32>) -> PostsPage {
        self.try_get_posts(page, page_size)
            .or_empty("Error fetching posts")
    }

    pub fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        self.try_get_post_by_slug(slug)
            .or_empty(&format!("Error fetching post with slug {slug}"))
    }

    pub fn get_all_post_slugs(&self) -> Vec<String> {
        self.try_get_all_post_slugs()
            .or_empty("Error fetching post slugs")
    }

    pub fn get_posts_by_category(&self, category_slug: &str) -> Vec<Post> {
        self.try_get_posts_by_category(category_slug)
            .or_empty(&format!("Error fetching posts for category {category_slug}"))
    }

    pub fn get_categories(&self) -> Vec<Category> {
        self.try_get_categories()
            .or_empty("Error fetching categories")
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Option<Category> {
        self.try_get_category_by_slug(slug)
            .or_empty(&format!("Error fetching category with slug {slug}"))
    }

    // ========================================================================
    // Fallible twins
    // ========================================================================

    pub fn try_get_posts(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<PostsPage, CmsError> {
        let options = FetchOptions::new()
            .populate_all()
            .page(page.unwrap_or(DEFAULT_PAGE))
            .page_size(page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .sort(NEWEST_FIRST);
        let (posts, pagination) = self.fetch_posts(&options)?;
        Ok(PostsPage { posts, pagination })
    }

    pub fn try_get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, CmsError> {
        let options = FetchOptions::new()
            .filter_eq(&["slug"], slug)
            .populate_all();
        let (posts, _) = self.fetch_posts(&options)?;
        Ok(posts.into_iter().next())
    }

    pub fn try_get_all_post_slugs(&self) -> Result<Vec<String>, CmsError> {
        let options = FetchOptions::new()
            .field(0, "slug")
            .page_size(SLUG_PAGE_SIZE);
        let slugs = match self.schema {
            PayloadSchema::Legacy => {
                let envelope: Envelope<Vec<legacy::SlugEntry>> =
                    self.client.fetch_api(POSTS, &options)?;
                envelope.normalize(legacy::slug_of).0
            }
            PayloadSchema::Current => {
                let envelope: Envelope<Vec<current::SlugRecord>> =
                    self.client.fetch_api(POSTS, &options)?;
                envelope.normalize(current::slug_of).0
            }
        };
        Ok(slugs)
    }

    pub fn try_get_posts_by_category(&self, category_slug: &str) -> Result<Vec<Post>, CmsError> {
        let options = FetchOptions::new()
            .filter_eq(&["category", "slug"], category_slug)
            .populate_all()
            .sort(NEWEST_FIRST);
        Ok(self.fetch_posts(&options)?.0)
    }

    pub fn try_get_categories(&self) -> Result<Vec<Category>, CmsError> {
        self.fetch_categories(&FetchOptions::new().sort(BY_NAME))
    }

    pub fn try_get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, CmsError> {
        let options = FetchOptions::new().filter_eq(&["slug"], slug);
        Ok(self.fetch_categories(&options)?.into_iter().next())
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    fn fetch_posts(
        &self,
        options: &FetchOptions,
    ) -> Result<(Vec<Post>, Option<Pagination>), CmsError> {
        let base = self.client.base_url();
        Ok(match self.schema {
            PayloadSchema::Legacy => {
                let envelope: Envelope<Vec<legacy::PostEntry>> =
                    self.client.fetch_api(POSTS, options)?;
                envelope.normalize(|entry| legacy::normalize_post(base, entry))
            }
            PayloadSchema::Current => {
                let envelope: Envelope<Vec<current::PostRecord>> =
                    self.client.fetch_api(POSTS, options)?;
                envelope.normalize(|record| current::normalize_post(base, record))
            }
        })
    }

    fn fetch_categories(&self, options: &FetchOptions) -> Result<Vec<Category>, CmsError> {
        Ok(match self.schema {
            PayloadSchema::Legacy => {
                let envelope: Envelope<Vec<legacy::CategoryEntry>> =
                    self.client.fetch_api(CATEGORIES, options)?;
                envelope.normalize(legacy::normalize_category).0
            }
            PayloadSchema::Current => {
                let envelope: Envelope<Vec<current::CategoryRecord>> =
                    self.client.fetch_api(CATEGORIES, options)?;
                envelope.normalize(current::normalize_category).0
            }
        })
    }
}
