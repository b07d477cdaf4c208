//! MIME type lookup for served files.
//!
//! A fixed table covers the types a static site actually ships; anything else
//! goes through `mime_guess` and finally falls back to octet-stream. Pure
//! lookup, never errors.

/// Generic fallback type for unknown extensions.
pub const FALLBACK_TYPE: &str = "application/octet-stream";

/// Determine the content type for a resolved file path.
pub fn content_type(path: &str) -> String {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if let Some(known) = lookup_table(extension) {
        return known.to_string();
    }

    // Library fallback for anything the table misses
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_TYPE.to_string())
}

/// Fixed table of common web MIME types.
fn lookup_table(extension: &str) -> Option<&'static str> {
    let content_type = match extension {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "wasm" => "application/wasm",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "webmanifest" => "application/manifest+json",
        "mp4" => "video/mp4",
        _ => return None,
    };
    Some(content_type)
}
