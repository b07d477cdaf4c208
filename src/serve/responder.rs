//! File responses.
//!
//! Reads resolved files from the static root and turns them into HTTP
//! responses: 200 with caching disabled on success, a local 404 page on read
//! failure. While live reload is active, HTML bodies get the reload client
//! script inserted before the closing body tag.

use crate::serve::mime;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::Response,
};
use std::path::Path;

/// URL path of the reload client script route.
pub const RELOAD_SCRIPT_PATH: &str = "/__vitrine_reload__.js";

/// Static 404 page body.
const NOT_FOUND_BODY: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>404 Not Found</title></head>
<body>
  <h1>404</h1>
  <p>The requested file was not found on this server.</p>
</body>
</html>
"#;

/// Serve a resolved file from the static root.
///
/// `resolved` must already be sanitized (see [`crate::serve::resolver`]).
/// A read failure of any kind maps to the local 404 page, never a process
/// error.
pub async fn serve_file(root: &Path, resolved: &str, live_reload: bool) -> Response {
    let file_path = root.join(resolved);

    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("read failed for {}: {}", file_path.display(), e);
            return not_found();
        }
    };

    let content_type = mime::content_type(resolved);

    let body = if live_reload && content_type.starts_with("text/html") {
        inject_reload_script(&content)
    } else {
        content
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(body))
        .unwrap()
}

/// Build the local 404 response.
pub fn not_found() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(NOT_FOUND_BODY))
        .unwrap()
}

/// Inject the reload client script into HTML content.
///
/// Inserts the script tag before the last `</body>`; without one, appends it
/// at the end. The splice is byte-wise, so content that isn't valid UTF-8
/// passes through unchanged. Content length is recomputed by the HTTP layer
/// from the new body.
pub fn inject_reload_script(content: &[u8]) -> Vec<u8> {
    let script_tag = format!(r#"<script src="{}"></script>"#, RELOAD_SCRIPT_PATH);

    if let Some(pos) = rfind_subslice(content, b"</body>") {
        let mut result = Vec::with_capacity(content.len() + script_tag.len() + 10);
        result.extend_from_slice(&content[..pos]);
        result.extend_from_slice(b"\n  ");
        result.extend_from_slice(script_tag.as_bytes());
        result.push(b'\n');
        result.extend_from_slice(&content[pos..]);
        return result;
    }

    // Fallback: append at end
    let mut result = content.to_vec();
    result.push(b'\n');
    result.extend_from_slice(script_tag.as_bytes());
    result
}

/// Position of the last occurrence of `needle` in `haystack`.
fn rfind_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_reload_script_with_body() {
        let html = b"<html><body><h1>Landing</h1></body></html>";
        let result = inject_reload_script(html);

        let result_str = String::from_utf8(result).unwrap();
        assert!(result_str.contains(r#"<script src="/__vitrine_reload__.js"></script>"#));

        // Script must land before </body>
        let script_pos = result_str.find("__vitrine_reload__").unwrap();
        let body_pos = result_str.find("</body>").unwrap();
        assert!(script_pos < body_pos);
    }

    #[test]
    fn test_inject_reload_script_before_last_body_tag() {
        let html = b"<body>inline `</body>` sample</body>";
        let result = String::from_utf8(inject_reload_script(html)).unwrap();

        // Injection targets the final closing tag
        let script_pos = result.find("__vitrine_reload__").unwrap();
        let last_body = result.rfind("</body>").unwrap();
        assert!(script_pos < last_body);
    }

    #[test]
    fn test_inject_preserves_non_utf8_bytes() {
        // Mis-encoded HTML (e.g. Latin-1) must round-trip byte for byte
        let mut html = b"<body>caf".to_vec();
        html.push(0xe9);
        html.extend_from_slice(&[0xff, 0xfe]);
        html.extend_from_slice(b"</body>");

        let result = inject_reload_script(&html);

        assert!(result.windows(3).any(|w| w == [0xe9, 0xff, 0xfe]));
        assert!(result.ends_with(b"</body>"));

        // Everything before the splice point is untouched
        let splice = rfind_subslice(&result, b"<script").unwrap();
        let kept = rfind_subslice(&html, b"</body>").unwrap();
        assert_eq!(&result[..kept], &html[..kept]);
        assert!(splice >= kept);
    }

    #[test]
    fn test_inject_reload_script_without_body() {
        let html = b"<h1>Fragment</h1>";
        let result = String::from_utf8(inject_reload_script(html)).unwrap();
        assert!(result.contains(r#"<script src="/__vitrine_reload__.js"></script>"#));
    }

    #[test]
    fn test_not_found_is_html() {
        let response = not_found();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_serve_file_missing_yields_404() {
        let temp = tempfile::TempDir::new().unwrap();
        let response = serve_file(temp.path(), "nope.html", true).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_file_html_gets_injection() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<body>hi</body>").unwrap();

        let response = serve_file(temp.path(), "index.html", true).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cache = response.headers().get(header::CACHE_CONTROL).unwrap();
        assert_eq!(cache, "no-cache");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("__vitrine_reload__"));
    }

    #[tokio::test]
    async fn test_serve_file_html_without_reload_untouched() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<body>hi</body>").unwrap();

        let response = serve_file(temp.path(), "index.html", false).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<body>hi</body>");
    }

    #[tokio::test]
    async fn test_serve_file_css_untouched() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("style.css"), "body { margin: 0 }").unwrap();

        let response = serve_file(temp.path(), "style.css", true).await;
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert_eq!(content_type, "text/css");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"body { margin: 0 }");
    }
}
