//! Site search.
//!
//! - `index`: build-time export of post summaries
//! - `filter`: the substring match over those summaries
//! - `session`: modal state (open/close, lazy index load, results)
//! - `loader`: reading a published index back from a URL or file
//! - `console`: the `search` command's terminal front end over `session`

pub mod console;
mod filter;
mod index;
mod loader;
mod session;

pub use filter::{filter_entries, parse_terms};
pub use index::{SearchIndexEntry, export_index};
pub use loader::{IndexSource, load_index};
pub use session::{HINT, ModalEvent, SearchSession, SearchView};
