//! Strapi v5 records: flat fields, relations inline.

use crate::content::{Author, Category, Post, resolve_image_url};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MediaRecord {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorRecord {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<MediaRecord>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRecord {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<MediaRecord>,
    pub published_at: String,
    pub updated_at: Option<String>,
    pub author: Option<AuthorRecord>,
    pub category: Option<CategoryRecord>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SlugRecord {
    pub slug: String,
}

fn media_url(base: &str, media: Option<MediaRecord>) -> Option<String> {
    resolve_image_url(base, media.as_ref().map(|m| m.url.as_str()))
}

pub fn normalize_author(base: &str, record: AuthorRecord) -> Author {
    Author {
        id: record.id,
        name: record.name,
        email: record.email,
        avatar: media_url(base, record.avatar),
        bio: record.bio,
    }
}

pub fn normalize_category(record: CategoryRecord) -> Category {
    Category {
        id: record.id,
        name: record.name,
        slug: record.slug,
        description: record.description,
    }
}

pub fn normalize_post(base: &str, record: PostRecord) -> Post {
    Post {
        id: record.id,
        title: record.title,
        slug: record.slug,
        content: record.content.unwrap_or_default(),
        excerpt: record.excerpt,
        cover_image: media_url(base, record.cover_image),
        published_at: record.published_at,
        updated_at: record.updated_at,
        author: record.author.map(|author| normalize_author(base, author)),
        category: record.category.map(normalize_category),
        tags: record.tags,
    }
}

pub fn slug_of(record: SlugRecord) -> String {
    record.slug
}
