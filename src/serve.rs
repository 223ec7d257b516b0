//! Development server.
//!
//! A lightweight HTTP server for previewing the build output, built on
//! `tiny_http`:
//!
//! - Static file serving from the build output directory
//! - Automatic `index.html` resolution for directories
//! - The search index answered live from the CMS, with the export's status
//! - Graceful shutdown on Ctrl+C
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Main Thread   │──── GET /search.json ──► export_index(&Blog) ──► CMS
//! │  (HTTP Server)  │
//! └────────┬────────┘
//!          │
//!          ▼
//!   config.build.output
//!      (dist/ dir)
//! ```

use crate::{
    config::{SiteConfig, cfg},
    content::Blog,
    log,
    search::export_index,
};
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Start the development server.
///
/// This function:
/// 1. Binds to the configured interface and port (with auto-retry on port conflict)
/// 2. Sets up Ctrl+C handler for graceful shutdown
/// 3. Enters the main request handling loop
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface address `{}`", c.serve.interface))?;

    let blog = Blog::from_config(&c.cms).context("Failed to create CMS client")?;
    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);
    log!("serve"; "search index at http://{}{}", addr, c.search_index_route());

    serve_requests(&server, &c, &blog);
    Ok(())
}

/// Handle requests until the server is unblocked.
fn serve_requests(server: &Server, config: &SiteConfig, blog: &Blog) {
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config, blog) {
            log!("serve"; "request error: {e:#}");
        }
    }
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
///
/// Returns the address actually bound, so port `0` reports the assigned port.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                let bound = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, bound));
            }
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(e) => bail!(
            "Failed to bind after {} attempts (ports {}-{}): {}",
            max_retries,
            base_port,
            base_port.saturating_add(max_retries - 1),
            e
        ),
        None => bail!("No port to bind: max_retries is 0"),
    }
}

// ============================================================================
// Request Handling
// ============================================================================

/// What a request path resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    SearchIndex,
    File(PathBuf),
    NotFound,
}

/// Resolve a raw request URL.
///
/// Request resolution order:
/// 1. The search index route → live export
/// 2. Exact file match → serve file
/// 3. Directory with index.html → serve index.html
/// 4. Nothing found (or a path escaping the root) → 404
fn resolve(serve_root: &Path, index_route: &str, raw_url: &str) -> Route {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(raw_url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Strip query string before resolving path
    let path_without_query = url_path.split('?').next().unwrap_or(&url_path);
    if path_without_query == index_route {
        return Route::SearchIndex;
    }

    let request_path = Path::new(path_without_query.trim_matches('/'));
    if request_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Route::NotFound;
    }

    let local_path = serve_root.join(request_path);
    if local_path.is_file() {
        return Route::File(local_path);
    }

    let index_path = local_path.join("index.html");
    if local_path.is_dir() && index_path.is_file() {
        return Route::File(index_path);
    }

    Route::NotFound
}

/// Handle a single HTTP request.
fn handle_request(request: Request, config: &SiteConfig, blog: &Blog) -> Result<()> {
    let route = resolve(&config.build.output, &config.search_index_route(), request.url());

    match route {
        Route::SearchIndex => {
            let document = export_index(blog);
            let response = Response::from_data(document.body.into_bytes())
                .with_status_code(document.status)
                .with_header(header("Content-Type", "application/json")?);
            request.respond(response)?;
        }
        Route::File(path) => serve_file(request, &path)?,
        Route::NotFound => serve_not_found(request)?,
    }
    Ok(())
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("Invalid header {name}: {value}"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response =
        Response::from_data(content).with_header(header("Content-Type", guess_content_type(path))?);
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![header("Content-Type", "text/plain")?],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",

        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
