//! URL path resolution against the static root.
//!
//! Maps an incoming request path to a root-relative file path. Query strings
//! are stripped, `.` and `..` segments are collapsed, and directory-like
//! paths default to the index document. Traversal attempts are neutralized by
//! dropping surplus `..` segments rather than rejecting the request.

/// Index document served for `/` and directory-like paths.
pub const INDEX_FILE: &str = "index.html";

/// Resolve a raw URL path to a path relative to the static root.
///
/// The result never contains `..` and never escapes the root, no matter how
/// many parent-directory segments the input carries.
///
/// # Examples
///
/// ```
/// use vitrine::serve::resolver::resolve;
///
/// assert_eq!(resolve("/"), "index.html");
/// assert_eq!(resolve("/css/style.css?v=2"), "css/style.css");
/// assert_eq!(resolve("/../../etc/passwd"), "etc/passwd");
/// ```
pub fn resolve(raw_path: &str) -> String {
    // Drop the query string (and any fragment, which proxies sometimes leak)
    let path = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or(raw_path);

    let trailing_slash = path.ends_with('/');

    // Collapse segments with a stack; `..` pops but never above the root
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    // Empty or directory-like paths get the index document
    if segments.is_empty() {
        return INDEX_FILE.to_string();
    }

    let mut resolved = segments.join("/");
    if trailing_slash {
        resolved.push('/');
        resolved.push_str(INDEX_FILE);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_resolves_to_index() {
        assert_eq!(resolve("/"), "index.html");
        assert_eq!(resolve(""), "index.html");
    }

    #[test]
    fn test_directory_path_resolves_to_index() {
        assert_eq!(resolve("/docs/"), "docs/index.html");
        assert_eq!(resolve("/a/b/"), "a/b/index.html");
    }

    #[test]
    fn test_plain_file() {
        assert_eq!(resolve("/css/style.css"), "css/style.css");
        assert_eq!(resolve("/index.html"), "index.html");
    }

    #[test]
    fn test_query_string_stripped() {
        assert_eq!(resolve("/js/app.js?v=123"), "js/app.js");
        assert_eq!(resolve("/?utm_source=mail"), "index.html");
    }

    #[test]
    fn test_dot_segments_collapsed() {
        assert_eq!(resolve("/a/./b.css"), "a/b.css");
        assert_eq!(resolve("/a/b/../c.css"), "a/c.css");
    }

    #[test]
    fn test_traversal_never_escapes_root() {
        assert_eq!(resolve("/../../etc/passwd"), "etc/passwd");
        assert_eq!(resolve("/../../../index.html"), "index.html");
        assert_eq!(resolve("/a/../../..//secret"), "secret");

        // Exhaustive-ish: any input with `..` stays relative, no leading parent
        let hostile = [
            "/..",
            "/../",
            "/a/../../b/../../c",
            "../../../../etc/shadow",
        ];
        for input in hostile {
            let resolved = resolve(input);
            assert!(!resolved.contains(".."), "escaped root for {input:?}: {resolved}");
            assert!(!resolved.starts_with('/'), "absolute result for {input:?}");
        }
    }

    #[test]
    fn test_duplicate_slashes_collapsed() {
        assert_eq!(resolve("//css//style.css"), "css/style.css");
    }
}
