//! The content dispatcher: the resolution engine's only caller.
//!
//! Flow per request: gate the method, percent-decode the path, resolve it
//! to a file through the extension fallback, read and render, then write
//! the body behind the fixed charset prelude. All error outcomes map to
//! responses in `AppError::into_response`.

use std::borrow::Cow;
use std::io;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use http::header::CONTENT_TYPE;
use tracing::instrument;

use crate::config::{HTML_CONTENT_TYPE, HTML_PRELUDE, NOT_FOUND_BODY};
use crate::error::AppError;
use crate::render;
use crate::resolve;
use crate::state::AppState;

/// Fallback handler for every path the router does not name.
#[instrument(name = "content::serve", skip_all)]
pub async fn serve(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    // Anything but GET is answered before the resolver runs. The status is
    // the historical 404, not 405.
    if method != Method::GET {
        tracing::debug!(%method, "non-GET request, answering not found");
        return (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY)).into_response();
    }

    match serve_path(&state, uri.path()).await {
        Ok(body) => ([(CONTENT_TYPE, HTML_CONTENT_TYPE)], body).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn serve_path(state: &AppState, raw_path: &str) -> Result<Vec<u8>, AppError> {
    let request_path = percent_decode(raw_path);

    let resolved = resolve::find_file(&state.config.content, &request_path)
        .await?
        .ok_or(AppError::NotFound)?;

    let raw = match tokio::fs::read(&resolved.path).await {
        Ok(raw) => raw,
        // The file can vanish between the existence probe and the read;
        // that is still an ordinary miss.
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(AppError::NotFound),
        Err(err) => return Err(err.into()),
    };

    let rendered = render::render(raw, &resolved.extension);
    tracing::debug!(
        path = %resolved.path.display(),
        extension = %resolved.extension,
        kind = ?rendered.kind,
        "serving file"
    );

    let mut body = Vec::with_capacity(HTML_PRELUDE.len() + rendered.bytes.len());
    body.extend_from_slice(HTML_PRELUDE.as_bytes());
    body.extend_from_slice(&rendered.bytes);
    Ok(body)
}

/// Percent-decode the URL path so encoded traversal sequences hit the same
/// containment check as plain ones. Paths that decode to invalid UTF-8 are
/// used as received; they can only fail to match a file.
fn percent_decode(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_encoded_traversal() {
        assert_eq!(percent_decode("/%2e%2e/%2e%2e/etc/passwd"), "/../../etc/passwd");
    }

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(percent_decode("/notes/plan"), "/notes/plan");
    }

    #[test]
    fn invalid_encoding_falls_back_to_raw() {
        assert_eq!(percent_decode("/%ff%fe"), "/%ff%fe");
    }
}
