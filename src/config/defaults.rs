//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn url() -> String {
        "http://localhost:4321".into()
    }

    pub fn name() -> String {
        "WardayaHub".into()
    }

    pub fn description() -> String {
        "A blog powered by Strapi".into()
    }
}

// ============================================================================
// [cms] Section Defaults
// ============================================================================

pub mod cms {
    use crate::cms::PayloadSchema;
    use std::path::PathBuf;

    pub fn url() -> String {
        "http://localhost:1337".into()
    }

    pub fn token() -> String {
        String::new()
    }

    pub fn token_path() -> Option<PathBuf> {
        None
    }

    pub fn api_prefix() -> String {
        "api".into()
    }

    pub fn schema() -> PayloadSchema {
        PayloadSchema::default()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn search_index() -> PathBuf {
        "search.json".into()
    }

    pub fn data() -> PathBuf {
        "_data".into()
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        4321
    }
}
