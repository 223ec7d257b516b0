//! Search modal state machine.
//!
//! Sans-IO: the session never fetches anything itself. Opening it while the
//! index is not loaded hands back a [`FetchTicket`]; the caller loads the
//! index and reports back through [`SearchSession::complete_fetch`]. Each
//! ticket carries a sequence number and only the most recently issued one is
//! accepted, so a slow superseded fetch can never overwrite a newer one.

use super::{SearchIndexEntry, filter_entries, parse_terms};
use crate::log;
use std::fmt::Display;

/// Shown while the query is empty.
pub const HINT: &str = "Type to search...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    /// Search button.
    Trigger,
    /// Ctrl+K / Cmd+K. Toggles.
    Shortcut,
    Escape,
    /// Click on the backdrop.
    ClickOutside,
    /// Click inside the dialog. No effect.
    ClickInside,
    /// A result was followed.
    Select,
}

/// Permission to perform one index fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the index is only loaded once the ticket is completed"]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub const fn seq(self) -> u64 {
        self.seq
    }
}

/// What the modal should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchView<'a> {
    Closed,
    Loading,
    Hint,
    /// The last fetch failed; reopening retries.
    Unavailable,
    NoResults { query: &'a str },
    Results(&'a [SearchIndexEntry]),
}

#[derive(Debug, Default)]
pub struct SearchSession {
    open: bool,
    query: String,
    results: Vec<SearchIndexEntry>,
    index: Option<Vec<SearchIndexEntry>>,
    /// Sequence of the most recently issued ticket.
    latest: u64,
    in_flight: bool,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Apply a UI event. Returns a ticket when the index must be fetched.
    pub fn handle(&mut self, event: ModalEvent) -> Option<FetchTicket> {
        match event {
            ModalEvent::Trigger => self.open(),
            ModalEvent::Shortcut if self.open => {
                self.close();
                None
            }
            ModalEvent::Shortcut => self.open(),
            ModalEvent::Escape | ModalEvent::ClickOutside | ModalEvent::Select => {
                self.close();
                None
            }
            ModalEvent::ClickInside => None,
        }
    }

    fn open(&mut self) -> Option<FetchTicket> {
        self.open = true;
        if self.index.is_some() {
            return None;
        }
        self.latest += 1;
        self.in_flight = true;
        Some(FetchTicket { seq: self.latest })
    }

    fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.results.clear();
    }

    /// Record the outcome of a fetch.
    ///
    /// Returns `false` when the ticket is stale and the outcome was dropped.
    /// A failed latest fetch leaves the index unloaded so the next open
    /// retries.
    pub fn complete_fetch<E: Display>(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<SearchIndexEntry>, E>,
    ) -> bool {
        if ticket.seq != self.latest {
            return false;
        }
        self.in_flight = false;

        match outcome {
            Ok(entries) => {
                self.index = Some(entries);
                self.refresh();
            }
            Err(err) => log!("search"; "failed to load search index: {err}"),
        }
        true
    }

    /// Replace the query. Ignored while closed.
    pub fn set_query(&mut self, query: &str) {
        if !self.open {
            return;
        }
        query.clone_into(&mut self.query);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.results = match &self.index {
            Some(index) => filter_entries(index, &self.query)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
    }

    pub fn view(&self) -> SearchView<'_> {
        if !self.open {
            SearchView::Closed
        } else if self.index.is_none() && self.in_flight {
            SearchView::Loading
        } else if parse_terms(&self.query).is_empty() {
            SearchView::Hint
        } else if self.index.is_none() {
            SearchView::Unavailable
        } else if self.results.is_empty() {
            SearchView::NoResults { query: &self.query }
        } else {
            SearchView::Results(&self.results)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> SearchIndexEntry {
        SearchIndexEntry {
            title: title.into(),
            slug: title.to_lowercase(),
            description: None,
            category: None,
            published_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn loaded(entries: Vec<SearchIndexEntry>) -> SearchSession {
        let mut session = SearchSession::new();
        let ticket = session.handle(ModalEvent::Trigger).unwrap();
        assert!(session.complete_fetch::<String>(ticket, Ok(entries)));
        session
    }

    #[test]
    fn test_open_issues_ticket_and_shows_loading() {
        let mut session = SearchSession::new();
        assert_eq!(session.view(), SearchView::Closed);

        let ticket = session.handle(ModalEvent::Trigger);
        assert_eq!(ticket.map(FetchTicket::seq), Some(1));
        assert_eq!(session.view(), SearchView::Loading);
    }

    #[test]
    fn test_loaded_index_is_cached() {
        let mut session = loaded(vec![entry("Hello")]);
        session.handle(ModalEvent::Escape);

        assert_eq!(session.handle(ModalEvent::Trigger), None);
        assert_eq!(session.view(), SearchView::Hint);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = SearchSession::new();
        let first = session.handle(ModalEvent::Trigger).unwrap();
        session.handle(ModalEvent::Escape);
        let second = session.handle(ModalEvent::Trigger).unwrap();
        assert!(second.seq() > first.seq());

        assert!(session.complete_fetch::<String>(second, Ok(vec![entry("Fresh")])));
        assert!(!session.complete_fetch::<String>(first, Ok(vec![entry("Stale")])));

        session.set_query("fresh");
        assert_eq!(session.view(), SearchView::Results(&[entry("Fresh")]));
        session.set_query("stale");
        assert_eq!(session.view(), SearchView::NoResults { query: "stale" });
    }

    #[test]
    fn test_stale_failure_does_not_clear_pending_fetch() {
        let mut session = SearchSession::new();
        let first = session.handle(ModalEvent::Trigger).unwrap();
        session.handle(ModalEvent::Shortcut);
        let second = session.handle(ModalEvent::Shortcut).unwrap();

        assert!(!session.complete_fetch(first, Err("timeout")));
        assert_eq!(session.view(), SearchView::Loading);
        assert!(session.complete_fetch::<String>(second, Ok(vec![])));
        assert_eq!(session.view(), SearchView::Hint);
    }

    #[test]
    fn test_failed_fetch_retries_on_next_open() {
        let mut session = SearchSession::new();
        let ticket = session.handle(ModalEvent::Trigger).unwrap();
        assert!(session.complete_fetch(ticket, Err("index unavailable")));
        assert!(!session.is_loaded());
        assert_eq!(session.view(), SearchView::Hint);
        session.set_query("hello");
        assert_eq!(session.view(), SearchView::Unavailable);

        session.handle(ModalEvent::ClickOutside);
        let retry = session.handle(ModalEvent::Trigger);
        assert_eq!(retry.map(FetchTicket::seq), Some(2));
    }

    #[test]
    fn test_shortcut_toggles() {
        let mut session = loaded(vec![]);
        session.handle(ModalEvent::Shortcut);
        assert!(!session.is_open());
        session.handle(ModalEvent::Shortcut);
        assert!(session.is_open());
    }

    #[test]
    fn test_click_inside_keeps_state() {
        let mut session = loaded(vec![entry("Hello")]);
        session.set_query("hel");
        session.handle(ModalEvent::ClickInside);

        assert!(session.is_open());
        assert_eq!(session.query(), "hel");
    }

    #[test]
    fn test_closing_clears_query_and_results() {
        for event in [ModalEvent::Escape, ModalEvent::ClickOutside, ModalEvent::Select] {
            let mut session = loaded(vec![entry("Hello")]);
            session.set_query("hello");
            assert!(matches!(session.view(), SearchView::Results(r) if r.len() == 1));

            session.handle(event);
            assert_eq!(session.view(), SearchView::Closed);
            assert_eq!(session.query(), "");

            session.handle(ModalEvent::Trigger);
            assert_eq!(session.view(), SearchView::Hint);
        }
    }

    #[test]
    fn test_whitespace_query_is_hint_not_no_results() {
        let mut session = loaded(vec![entry("Hello")]);
        session.set_query("   ");
        assert_eq!(session.view(), SearchView::Hint);
    }

    #[test]
    fn test_query_typed_before_index_arrives() {
        let mut session = SearchSession::new();
        let ticket = session.handle(ModalEvent::Trigger).unwrap();
        session.set_query("hello");
        assert_eq!(session.view(), SearchView::Loading);

        session.complete_fetch::<String>(ticket, Ok(vec![entry("Hello"), entry("Bye")]));
        assert_eq!(session.view(), SearchView::Results(&[entry("Hello")]));
    }

    #[test]
    fn test_set_query_ignored_while_closed() {
        let mut session = SearchSession::new();
        session.set_query("hello");
        assert_eq!(session.query(), "");
    }
}
