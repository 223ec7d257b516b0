//! Terminal front end for the search modal.
//!
//! Drives a [`SearchSession`] from a one-shot query or from input lines,
//! performing the index fetches the session asks for.

use super::{
    HINT, IndexSource, ModalEvent, SearchIndexEntry, SearchSession, SearchView, load_index,
};
use crate::cms::error_chain;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Input line that ends an interactive session.
pub const QUIT: &str = ":q";

const UNAVAILABLE: &str = "Search index unavailable";

/// Run one query, or read queries from `input` until [`QUIT`] or EOF.
pub fn run(
    source: &IndexSource,
    query: Option<&str>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut session = SearchSession::new();
    open(&mut session, source);

    if let Some(query) = query {
        session.set_query(query);
        return render(session.view(), out);
    }

    render(session.view(), out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim() == QUIT {
            break;
        }
        if !session.is_loaded() {
            // Reopening retries a failed load.
            session.handle(ModalEvent::Escape);
            open(&mut session, source);
        }
        session.set_query(&line);
        render(session.view(), out)?;
    }
    session.handle(ModalEvent::Escape);
    Ok(())
}

fn open(session: &mut SearchSession, source: &IndexSource) {
    if let Some(ticket) = session.handle(ModalEvent::Trigger) {
        let outcome = load_index(source).map_err(|err| format!("{source}: {}", error_chain(&err)));
        session.complete_fetch(ticket, outcome);
    }
}

fn render(view: SearchView<'_>, out: &mut impl Write) -> Result<()> {
    match view {
        SearchView::Closed => {}
        SearchView::Loading => writeln!(out, "Loading...")?,
        SearchView::Hint => writeln!(out, "{HINT}")?,
        SearchView::Unavailable => writeln!(out, "{UNAVAILABLE}")?,
        SearchView::NoResults { query } => writeln!(out, "No results found for \"{query}\"")?,
        SearchView::Results(entries) => {
            for entry in entries {
                render_entry(entry, out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn render_entry(entry: &SearchIndexEntry, out: &mut impl Write) -> Result<()> {
    match &entry.category {
        Some(category) => writeln!(out, "{} [{category}]  /blog/{}", entry.title, entry.slug)?,
        None => writeln!(out, "{}  /blog/{}", entry.title, entry.slug)?,
    }
    if let Some(description) = &entry.description {
        writeln!(out, "    {description}")?;
    }
    Ok(())
}
