//! Ordered extension fallback over the sanitized candidates.

use std::path::Path;

use crate::config::ContentConfig;
use crate::error::AppError;

use super::{sanitize, secure};

/// A successfully resolved request: where the file lives and which
/// extension claimed it. Request-scoped; dropped once the response is
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: std::path::PathBuf,
    pub extension: String,
}

/// Decide which file, if any, serves `request_path`.
///
/// A path that already carries an extension builds exactly one candidate:
/// the extension is taken as the caller's definitive intent and the
/// fallback list is never consulted. An extensionless path tries the
/// configured extensions in order and the first existing file wins — list
/// order is the only tiebreak, never modification time or size.
///
/// A miss is `Ok(None)`; only containment violations and filesystem faults
/// surface as errors, and either one aborts the scan.
pub async fn find_file(
    content: &ContentConfig,
    request_path: &str,
) -> Result<Option<ResolvedFile>, AppError> {
    let rel = request_path.strip_prefix('/').unwrap_or(request_path);

    if !rel.is_empty() && !rel.ends_with('/') && sanitize::has_explicit_extension(rel) {
        let path = secure::resolve(&content.root, rel).await?;
        if secure::exists(&path).await? {
            return Ok(Some(ResolvedFile {
                path,
                extension: extension_of(rel),
            }));
        }
        return Ok(None);
    }

    for extension in &content.extensions {
        let candidate = sanitize::sanitize(request_path, extension);
        let path = secure::resolve(&content.root, &candidate).await?;
        if secure::exists(&path).await? {
            return Ok(Some(ResolvedFile {
                path,
                extension: extension.clone(),
            }));
        }
    }
    Ok(None)
}

fn extension_of(rel: &str) -> String {
    Path::new(rel)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn content_root(extensions: &[&str]) -> (tempfile::TempDir, ContentConfig) {
        let dir = tempfile::tempdir().unwrap();
        let config = ContentConfig {
            root: dir.path().canonicalize().unwrap(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        };
        (dir, config)
    }

    fn touch(config: &ContentConfig, rel: &str) -> PathBuf {
        let path = config.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, rel).unwrap();
        path
    }

    #[tokio::test]
    async fn earlier_extension_wins_when_both_exist() {
        let (_dir, config) = content_root(&["html", "md"]);
        let html = touch(&config, "about.html");
        touch(&config, "about.md");

        let found = find_file(&config, "/about").await.unwrap().unwrap();
        assert_eq!(found.path, html);
        assert_eq!(found.extension, "html");
    }

    #[tokio::test]
    async fn later_extension_matches_when_earlier_is_absent() {
        let (_dir, config) = content_root(&["html", "md"]);
        let md = touch(&config, "notes/plan.md");

        let found = find_file(&config, "/notes/plan").await.unwrap().unwrap();
        assert_eq!(found.path, md);
        assert_eq!(found.extension, "md");
    }

    #[tokio::test]
    async fn explicit_extension_never_falls_back() {
        let (_dir, config) = content_root(&["html", "md"]);
        touch(&config, "readme.txt.html");
        touch(&config, "readme.md");

        // /readme.txt names exactly readme.txt; neither the .html-suffixed
        // file nor the .md sibling may substitute for it.
        let found = find_file(&config, "/readme.txt").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn explicit_extension_is_served_when_present() {
        let (_dir, config) = content_root(&["html"]);
        let txt = touch(&config, "notes/plan.txt");

        let found = find_file(&config, "/notes/plan.txt").await.unwrap().unwrap();
        assert_eq!(found.path, txt);
        assert_eq!(found.extension, "txt");
    }

    #[tokio::test]
    async fn root_resolves_like_index() {
        let (_dir, config) = content_root(&["html"]);
        let index = touch(&config, "index.html");

        for request in ["/", "/index", "/index.html"] {
            let found = find_file(&config, request).await.unwrap().unwrap();
            assert_eq!(found.path, index, "request {request}");
        }
    }

    #[tokio::test]
    async fn directory_style_path_resolves_nested_index() {
        let (_dir, config) = content_root(&["html", "md"]);
        let index = touch(&config, "blog/index.md");

        let found = find_file(&config, "/blog/").await.unwrap().unwrap();
        assert_eq!(found.path, index);
        assert_eq!(found.extension, "md");
    }

    #[tokio::test]
    async fn miss_is_none_not_an_error() {
        let (_dir, config) = content_root(&["html", "md"]);

        assert!(find_file(&config, "/missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn traversal_aborts_the_scan() {
        let (_dir, config) = content_root(&["html", "md"]);

        let err = find_file(&config, "/../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, AppError::Traversal(_)));
    }
}
