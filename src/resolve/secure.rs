//! The containment boundary: joining untrusted relative paths to the root.
//!
//! Every candidate path goes through [`resolve`] before any filesystem
//! access. The check is two-layered: a lexical pass neutralizes `..` and
//! absolute-path injection without touching the disk, and for targets that
//! exist, symlinks are resolved and the result re-checked against the
//! canonical root. A defect here is a file-disclosure hole, so inputs are
//! treated as hostile no matter where they came from.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

/// Lexically flatten a relative path. `.` segments are dropped, `..` pops
/// the previous segment and fails if there is nothing left to pop, and
/// absolute segments (or Windows prefixes) are rejected outright.
fn flatten(relative: &str) -> Result<PathBuf, AppError> {
    let mut flat = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => flat.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !flat.pop() {
                    return Err(AppError::Traversal(relative.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(AppError::Traversal(relative.to_string()));
            }
        }
    }
    Ok(flat)
}

/// Join `relative` to `root` such that the result cannot leave `root`.
///
/// `root` must already be canonical (the config loader guarantees this).
/// When the joined path exists its symlinks are resolved and the resolved
/// path must still be a descendant of `root`; when it does not exist the
/// joined path is returned as-is and [`exists`] will report `false` for it.
pub async fn resolve(root: &Path, relative: &str) -> Result<PathBuf, AppError> {
    let joined = root.join(flatten(relative)?);
    match tokio::fs::canonicalize(&joined).await {
        Ok(resolved) => {
            if resolved.starts_with(root) {
                Ok(resolved)
            } else {
                Err(AppError::Traversal(relative.to_string()))
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(joined),
        Err(err) => Err(err.into()),
    }
}

/// Metadata probe that keeps "not present" apart from real filesystem
/// faults. Only regular files count as present: directories — the root
/// itself included — are never servable.
pub async fn exists(path: &Path) -> Result<bool, AppError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}
