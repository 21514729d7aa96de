//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route
//! matching, and access logging.

use crate::config::AppState;
use crate::handler::{pages, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Static asset route prefix
const STATIC_PREFIX: &str = "/static/";

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = format_version(req.version());
    entry.referer = header_string(&req, "referer");
    entry.user_agent = header_string(&req, "user-agent");

    let response = dispatch(&req, &state).await;

    entry.status = response.status().as_u16();
    entry.body_bytes =
        usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(0);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    if state.config.logging.access_log {
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the method and route the request
async fn dispatch(
    req: &Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let method = req.method();

    if let Some(resp) = check_http_method(method) {
        return resp;
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head: *method == Method::HEAD,
        if_none_match: header_string(req, "if-none-match"),
        range_header: header_string(req, "range"),
    };

    route_request(&ctx, state).await
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path
async fn route_request(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    // 1. Landing page
    if ctx.path == "/" {
        return pages::serve_index(ctx, state).await;
    }

    // 2. Static assets
    if let Some(filename) = ctx.path.strip_prefix(STATIC_PREFIX) {
        return static_files::serve_asset(ctx, &state.config.site.static_dir, filename).await;
    }

    // 3. Everything else
    http::build_404_response()
}

/// Extract a header value as an owned string
fn header_string(req: &Request<hyper::body::Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn format_version(version: hyper::Version) -> String {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2.0",
        hyper::Version::HTTP_3 => "3.0",
        _ => "1.1",
    }
    .to_string()
}
