//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wardaya blog front end CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: wardaya.toml)
    #[arg(short = 'C', long, default_value = "wardaya.toml")]
    pub config: PathBuf,

    /// Override the CMS base URL, e.g. `http://localhost:1337`
    #[arg(long = "cms-url")]
    pub cms_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch content from the CMS and write the search index, data snapshots and sitemap
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// enable sitemap generation
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        sitemap: Option<bool>,
    },

    /// Serve the output directory and a live `/search.json`
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search the index; without a query, read one query per line from stdin
    Search {
        /// Query terms (joined with spaces)
        query: Vec<String>,

        /// Index location: an http(s) URL or a file path
        /// (default: the built index, else `<site.url>/search.json`)
        #[arg(long)]
        index: Option<String>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_search(&self) -> bool {
        matches!(self.command, Commands::Search { .. })
    }
}
