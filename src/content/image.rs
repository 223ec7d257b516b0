//! Media URL resolution.

use reqwest::Url;

/// Make a CMS media reference absolute.
///
/// - `None` or `""` resolves to `None`
/// - anything that already parses as an absolute URL is returned unchanged
/// - a relative path is appended to `base` with exactly one `/` between them
///
/// Idempotent: feeding a result back in returns it unchanged.
pub fn resolve_image_url(base: &str, url: Option<&str>) -> Option<String> {
    let url = url.filter(|url| !url.is_empty())?;

    if Url::parse(url).is_ok() {
        return Some(url.to_owned());
    }

    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        url.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:1337";

    #[test]
    fn test_missing_or_empty_is_none() {
        assert_eq!(resolve_image_url(BASE, None), None);
        assert_eq!(resolve_image_url(BASE, Some("")), None);
    }

    #[test]
    fn test_absolute_url_passes_through() {
        let url = "https://cdn.example.com/a.png";
        assert_eq!(resolve_image_url(BASE, Some(url)).as_deref(), Some(url));
    }

    #[test]
    fn test_relative_path_joins_base() {
        assert_eq!(
            resolve_image_url(BASE, Some("/uploads/a.png")).as_deref(),
            Some("http://localhost:1337/uploads/a.png")
        );
        assert_eq!(
            resolve_image_url("http://localhost:1337/", Some("uploads/a.png")).as_deref(),
            Some("http://localhost:1337/uploads/a.png")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        for input in ["/uploads/a.png", "uploads/b.jpg", "https://cdn.example.com/c.webp"] {
            let once = resolve_image_url(BASE, Some(input));
            let twice = resolve_image_url(BASE, once.as_deref());
            assert_eq!(once, twice, "input {input}");
        }
    }
}
