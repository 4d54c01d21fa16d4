//! Request-level error taxonomy.
//!
//! Three outcomes leave the resolution pipeline as errors: an ordinary miss,
//! a path that tried to escape the content root, and a real filesystem
//! fault. The first two answer with the same 404 body so a client cannot
//! tell traversal detection apart from a missing page; the log stream can.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::io;

use crate::config::{INTERNAL_ERROR_BODY, NOT_FOUND_BODY};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("no file matched the request path")]
    NotFound,

    #[error("path escapes the content root: {0}")]
    Traversal(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response()
            }
            AppError::Traversal(path) => {
                // Same status and body as an ordinary miss, distinct log.
                tracing::warn!(path = %path, "rejected path traversal attempt");
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response()
            }
            AppError::Io(err) => {
                tracing::error!(error = %err, "filesystem error while serving request");
                let body = format!("{INTERNAL_ERROR_BODY}Error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_and_traversal_share_a_status() {
        let miss = AppError::NotFound.into_response();
        let traversal = AppError::Traversal("../../etc/passwd".to_string()).into_response();
        assert_eq!(miss.status(), StatusCode::NOT_FOUND);
        assert_eq!(traversal.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn io_errors_are_server_faults() {
        let err = AppError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
