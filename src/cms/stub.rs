//! In-process Strapi stand-in for tests.
//!
//! Serves canned JSON from a routing closure and records every request it
//! receives (decoded URL plus the headers the client is expected to send).

use crate::cms::PayloadSchema;
use crate::config::CmsConfig;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

pub struct StubCms {
    pub base_url: String,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl StubCms {
    /// Start serving; `route` maps the decoded request URL to `(status, body)`.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind stub cms"));
        let port = server
            .server_addr()
            .to_ip()
            .expect("stub cms listens on ip")
            .port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            thread::spawn(move || {
                for request in server.incoming_requests() {
                    let raw = request.url().to_owned();
                    let url = urlencoding::decode(&raw)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or(raw);
                    let header = |name: &'static str| {
                        request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv(name))
                            .map(|h| h.value.as_str().to_owned())
                    };
                    let recorded = RecordedRequest {
                        url: url.clone(),
                        authorization: header("Authorization"),
                        content_type: header("Content-Type"),
                    };
                    requests.lock().expect("request log").push(recorded);

                    let (status, body) = route(&url);
                    let response = Response::from_data(body.into_bytes())
                        .with_status_code(status)
                        .with_header(
                            Header::from_bytes("Content-Type", "application/json")
                                .expect("static header"),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            server,
            requests,
            handle: Some(handle),
        }
    }

    /// Serve `body` with status 200 for every request.
    pub fn json(body: Value) -> Self {
        let body = body.to_string();
        Self::start(move |_| (200, body.clone()))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log").clone()
    }

    /// Client config pointing at this stub.
    pub fn config(&self, schema: PayloadSchema) -> CmsConfig {
        CmsConfig {
            url: self.base_url.clone(),
            schema,
            ..CmsConfig::default()
        }
    }
}

impl Drop for StubCms {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A base URL on a port nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ============================================================================
// Fixtures
// ============================================================================

/// Strapi v4 post entry with populated category and author.
pub fn legacy_post(id: u64, slug: &str, title: &str, category: &str) -> Value {
    json!({
        "id": id,
        "attributes": {
            "title": title,
            "slug": slug,
            "content": format!("# {title}"),
            "excerpt": format!("About {title}"),
            "publishedAt": "2024-03-01T10:00:00.000Z",
            "updatedAt": "2024-03-02T08:30:00.000Z",
            "coverImage": { "data": { "id": 90 + id, "attributes": { "url": format!("/uploads/{slug}.png") } } },
            "author": { "data": { "id": 7, "attributes": {
                "name": "Dewi",
                "email": "dewi@example.com",
                "avatar": { "data": { "id": 70, "attributes": { "url": "https://cdn.example.com/dewi.jpg" } } }
            } } },
            "category": { "data": { "id": 3, "attributes": {
                "name": category,
                "slug": category.to_lowercase(),
                "description": null
            } } },
            "tags": ["rust", "web"]
        }
    })
}

/// Strapi v5 flat post record, same content as [`legacy_post`].
pub fn current_post(id: u64, slug: &str, title: &str, category: &str) -> Value {
    json!({
        "id": id,
        "documentId": format!("doc{id}"),
        "title": title,
        "slug": slug,
        "content": format!("# {title}"),
        "excerpt": format!("About {title}"),
        "publishedAt": "2024-03-01T10:00:00.000Z",
        "updatedAt": "2024-03-02T08:30:00.000Z",
        "coverImage": { "id": 90 + id, "url": format!("/uploads/{slug}.png") },
        "author": {
            "id": 7,
            "name": "Dewi",
            "email": "dewi@example.com",
            "avatar": { "id": 70, "url": "https://cdn.example.com/dewi.jpg" }
        },
        "category": { "id": 3, "name": category, "slug": category.to_lowercase() },
        "tags": ["rust", "web"]
    })
}

pub fn legacy_category(id: u64, name: &str, slug: &str) -> Value {
    json!({ "id": id, "attributes": { "name": name, "slug": slug, "description": format!("All about {name}") } })
}

pub fn current_category(id: u64, name: &str, slug: &str) -> Value {
    json!({ "id": id, "documentId": format!("cat{id}"), "name": name, "slug": slug, "description": format!("All about {name}") })
}

/// Wrap records into a collection envelope with page metadata.
pub fn envelope(data: Vec<Value>, page: u32, page_size: u32, total: u32) -> Value {
    let page_count = total.div_ceil(page_size.max(1));
    json!({
        "data": data,
        "meta": { "pagination": {
            "page": page,
            "pageSize": page_size,
            "pageCount": page_count,
            "total": total
        } }
    })
}
