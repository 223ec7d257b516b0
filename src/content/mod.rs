//! Blog content: normalized entities and the operations that fetch them.

mod blog;
mod image;
mod types;

pub use blog::Blog;
pub use image::resolve_image_url;
pub use types::{Author, Category, Pagination, Post, PostsPage};
