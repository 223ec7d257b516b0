//! Generated site artifacts beyond the page data.

pub mod sitemap;
