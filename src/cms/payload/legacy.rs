//! Strapi v4 records: `{ id, attributes }` with `{ data }`-wrapped relations.

use crate::content::{Author, Category, Post, resolve_image_url};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Entry<A> {
    pub id: u64,
    pub attributes: A,
}

/// A to-one relation; `data` is `null` or absent when unset.
#[derive(Debug, Deserialize)]
pub struct Relation<A> {
    pub data: Option<Entry<A>>,
}

impl<A> Relation<A> {
    fn into_entry(relation: Option<Self>) -> Option<Entry<A>> {
        relation.and_then(|relation| relation.data)
    }
}

#[derive(Debug, Deserialize)]
pub struct MediaAttributes {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthorAttributes {
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<Relation<MediaAttributes>>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryAttributes {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostAttributes {
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<Relation<MediaAttributes>>,
    pub published_at: String,
    pub updated_at: Option<String>,
    pub author: Option<Relation<AuthorAttributes>>,
    pub category: Option<Relation<CategoryAttributes>>,
    pub tags: Option<Vec<String>>,
}

/// Result of a `fields[0]=slug` query.
#[derive(Debug, Deserialize)]
pub struct SlugAttributes {
    pub slug: String,
}

pub type PostEntry = Entry<PostAttributes>;
pub type CategoryEntry = Entry<CategoryAttributes>;
pub type SlugEntry = Entry<SlugAttributes>;

fn media_url(base: &str, media: Option<Relation<MediaAttributes>>) -> Option<String> {
    let entry = Relation::into_entry(media)?;
    resolve_image_url(base, Some(&entry.attributes.url))
}

pub fn normalize_author(base: &str, entry: Entry<AuthorAttributes>) -> Author {
    let Entry { id, attributes } = entry;
    Author {
        id,
        name: attributes.name,
        email: attributes.email,
        avatar: media_url(base, attributes.avatar),
        bio: attributes.bio,
    }
}

pub fn normalize_category(entry: CategoryEntry) -> Category {
    let Entry { id, attributes } = entry;
    Category {
        id,
        name: attributes.name,
        slug: attributes.slug,
        description: attributes.description,
    }
}

pub fn normalize_post(base: &str, entry: PostEntry) -> Post {
    let Entry { id, attributes: a } = entry;
    Post {
        id,
        title: a.title,
        slug: a.slug,
        content: a.content.unwrap_or_default(),
        excerpt: a.excerpt,
        cover_image: media_url(base, a.cover_image),
        published_at: a.published_at,
        updated_at: a.updated_at,
        author: Relation::into_entry(a.author).map(|author| normalize_author(base, author)),
        category: Relation::into_entry(a.category).map(normalize_category),
        tags: a.tags,
    }
}

pub fn slug_of(entry: SlugEntry) -> String {
    entry.attributes.slug
}
