//! Substring filtering over the search index.

use super::SearchIndexEntry;

/// Most results shown for one query.
pub const MAX_RESULTS: usize = 5;

/// Lowercased whitespace-separated terms; never contains empty strings.
pub fn parse_terms(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

fn contains_all(haystack: &str, terms: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

/// All terms in the title, or all terms in the description.
fn matches(entry: &SearchIndexEntry, terms: &[String]) -> bool {
    contains_all(&entry.title, terms)
        || entry
            .description
            .as_deref()
            .is_some_and(|description| contains_all(description, terms))
}

/// First [`MAX_RESULTS`] matching entries in index order.
///
/// An empty or whitespace-only query matches nothing.
pub fn filter_entries<'a>(entries: &'a [SearchIndexEntry], query: &str) -> Vec<&'a SearchIndexEntry> {
    let terms = parse_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    entries
        .iter()
        .filter(|entry| matches(entry, &terms))
        .take(MAX_RESULTS)
        .collect()
}
