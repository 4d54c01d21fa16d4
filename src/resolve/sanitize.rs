//! Pure path-mapping: raw request path + candidate extension → relative path.

use std::path::Path;

/// Map a request path and one candidate extension to a relative file path.
///
/// The leading `/` is stripped. The root becomes `index.<ext>`, a
/// directory-style path (trailing `/`) gets `index.<ext>` appended, a path
/// that already carries a non-empty extension is kept as-is, and anything
/// else gets `.<ext>` appended.
///
/// No I/O and no failure path; `..` segments pass through untouched and are
/// the secure join's problem.
pub fn sanitize(request_path: &str, extension: &str) -> String {
    let rel = request_path.strip_prefix('/').unwrap_or(request_path);
    if rel.is_empty() {
        return format!("index.{extension}");
    }
    if rel.ends_with('/') {
        return format!("{rel}index.{extension}");
    }
    if has_explicit_extension(rel) {
        rel.to_string()
    } else {
        format!("{rel}.{extension}")
    }
}

/// Whether the path names a file with a non-empty extension. A trailing dot
/// (`notes.`) does not count.
pub fn has_explicit_extension(rel: &str) -> bool {
    Path::new(rel)
        .extension()
        .is_some_and(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        assert_eq!(sanitize("/", "html"), "index.html");
    }

    #[test]
    fn directory_path_maps_to_nested_index() {
        assert_eq!(sanitize("/blog/", "md"), "blog/index.md");
    }

    #[test]
    fn explicit_extension_is_kept() {
        assert_eq!(sanitize("/notes/plan.txt", "html"), "notes/plan.txt");
    }

    #[test]
    fn extensionless_path_gets_candidate_extension() {
        assert_eq!(sanitize("/about", "html"), "about.html");
        assert_eq!(sanitize("/notes/plan", "md"), "notes/plan.md");
    }

    #[test]
    fn trailing_dot_is_not_an_extension() {
        assert_eq!(sanitize("/draft.", "html"), "draft..html");
        assert!(!has_explicit_extension("draft."));
    }

    #[test]
    fn traversal_segments_pass_through_unmodified() {
        // Containment is not this layer's job.
        assert_eq!(sanitize("/../secret", "html"), "../secret.html");
    }
}
