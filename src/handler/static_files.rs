//! Static asset serving module
//!
//! Resolves asset requests against the static root and builds responses with
//! MIME detection, conditional request handling, and Range support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeParseResult};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Serve a file from the static root
pub async fn serve_asset(
    ctx: &RequestContext<'_>,
    static_dir: &str,
    filename: &str,
) -> Response<Full<Bytes>> {
    match load_asset(static_dir, filename).await {
        Some((content, content_type)) => build_asset_response(
            &content,
            content_type,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
            ctx.range_header.as_deref(),
        ),
        None => http::build_404_response(),
    }
}

/// Resolve and read an asset under the static root
///
/// Returns `None` for missing files and for any resolved path that escapes
/// the canonicalized root.
pub async fn load_asset(static_dir: &str, filename: &str) -> Option<(Vec<u8>, &'static str)> {
    // Strip leading slashes so the name always joins relative to the root.
    // Names containing ".." stay intact; the canonicalize containment check
    // below rejects anything that resolves outside the root.
    let clean = filename.trim_start_matches('/');
    if clean.is_empty() {
        return None;
    }

    let file_path = Path::new(static_dir).join(clean);

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // Missing files are common (404), no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            filename,
            file_path_canonical.display()
        ));
        return None;
    }

    // Directories are not served
    if !file_path_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_path_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path_canonical.display()
            ));
            return None;
        }
    };

    // Determine content type from extension
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Build static file response with `ETag` and Range support
fn build_asset_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
    range_header: Option<&str>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);
    let total_size = data.len();

    // Check if client has a cached version
    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    // Check for Range request
    match http::parse_range_header(range_header, total_size) {
        RangeParseResult::Valid(range) => {
            let start = range.start;
            let end = range.end_position(total_size);

            let body = if is_head {
                Bytes::new()
            } else {
                Bytes::from(data[start..=end].to_vec())
            };

            return http::response::build_partial_response(
                body,
                content_type,
                &etag,
                start,
                end,
                total_size,
                is_head,
            );
        }
        RangeParseResult::NotSatisfiable => {
            return http::build_416_response(total_size, is_head);
        }
        RangeParseResult::None => {
            // No Range header or malformed, return full content
        }
    }

    // Full response
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    http::response::build_cached_response(body, content_type, &etag, is_head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Builds a throwaway static root with one asset in it
    fn temp_static_root(tag: &str) -> std::path::PathBuf {
        let root = std::env::temp_dir().join(format!("landing_server_static_{tag}"));
        std::fs::create_dir_all(&root).expect("create temp static root");
        let mut file = std::fs::File::create(root.join("logo.svg")).expect("create asset");
        file.write_all(b"<svg></svg>").expect("write asset");
        root
    }

    #[tokio::test]
    async fn test_existing_asset_loads_with_content_type() {
        let root = temp_static_root("hit");
        let dir = root.to_str().expect("utf-8 path");

        let (content, content_type) = load_asset(dir, "logo.svg")
            .await
            .expect("asset should resolve");
        assert_eq!(content, b"<svg></svg>");
        assert_eq!(content_type, "image/svg+xml");

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_missing_asset_is_none() {
        let root = temp_static_root("miss");
        let dir = root.to_str().expect("utf-8 path");

        assert!(load_asset(dir, "missing.png").await.is_none());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_traversal_is_blocked() {
        let root = temp_static_root("traversal");
        let dir = root.to_str().expect("utf-8 path");

        // A sibling file outside the root must not be reachable
        let sibling = std::env::temp_dir().join("landing_server_outside.txt");
        std::fs::write(&sibling, b"secret").expect("write sibling");

        assert!(load_asset(dir, "../landing_server_outside.txt").await.is_none());
        assert!(load_asset(dir, "..%2Flanding_server_outside.txt").await.is_none());
        assert!(load_asset(dir, "").await.is_none());

        let _ = std::fs::remove_file(sibling);
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn test_empty_asset_suffix_range_is_not_satisfiable() {
        // A zero-byte file is valid content; a suffix range over it is 416,
        // never a slice panic
        let resp = build_asset_response(b"", "text/plain", None, false, Some("bytes=-1"));
        assert_eq!(resp.status(), 416);

        let resp = build_asset_response(b"", "text/plain", None, false, None);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "0");
    }

    #[tokio::test]
    async fn test_dotted_filename_is_served() {
        let root = temp_static_root("dotted");
        let dir = root.to_str().expect("utf-8 path");

        // Dots in a name are not traversal; the file must resolve
        std::fs::write(root.join("a..b.css"), b"body{}").expect("write dotted asset");

        let (content, content_type) = load_asset(dir, "a..b.css")
            .await
            .expect("dotted filename should resolve");
        assert_eq!(content, b"body{}");
        assert_eq!(content_type, "text/css");

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_directory_is_not_served() {
        let root = temp_static_root("dir");
        let dir = root.to_str().expect("utf-8 path");
        std::fs::create_dir_all(root.join("nested")).expect("create nested dir");

        assert!(load_asset(dir, "nested").await.is_none());

        let _ = std::fs::remove_dir_all(root);
    }
}
