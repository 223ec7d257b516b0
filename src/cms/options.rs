//! Request options for CMS calls.
//!
//! Strapi encodes filters, pagination, sorting, field selection and
//! population as bracketed query keys:
//!
//! | helper | query key |
//! |--------|-----------|
//! | `populate_all()` | `populate=*` |
//! | `page(2)` | `pagination[page]=2` |
//! | `page_size(10)` | `pagination[pageSize]=10` |
//! | `sort("publishedAt:desc")` | `sort=publishedAt:desc` |
//! | `filter_eq(&["category", "slug"], "rust")` | `filters[category][slug][$eq]=rust` |
//! | `field(0, "slug")` | `fields[0]=slug` |

/// Query parameters plus extra request headers for one CMS call.
///
/// Parameters keep insertion order; the HTTP layer url-encodes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arbitrary query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Add a request header. Overrides the client's defaults of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn populate_all(self) -> Self {
        self.param("populate", "*")
    }

    pub fn page(self, page: u32) -> Self {
        self.param("pagination[page]", page)
    }

    pub fn page_size(self, page_size: u32) -> Self {
        self.param("pagination[pageSize]", page_size)
    }

    pub fn sort(self, spec: &str) -> Self {
        self.param("sort", spec)
    }

    /// `filters[a][b]...[$eq]=value`
    pub fn filter_eq(self, path: &[&str], value: &str) -> Self {
        let key: String = path.iter().map(|segment| format!("[{segment}]")).collect();
        self.param(format!("filters{key}[$eq]"), value)
    }

    /// `fields[index]=name`
    pub fn field(self, index: usize, name: &str) -> Self {
        self.param(format!("fields[{index}]"), name)
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
