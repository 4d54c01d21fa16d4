//! Content rendering: markdown becomes HTML, everything else passes through.

use pulldown_cmark::{html, Options, Parser};

use crate::config::MARKDOWN_EXTENSION;

/// How the bytes of a response body were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Served byte-identical to the file on disk.
    Raw,
    /// Rendered from markdown into an HTML fragment.
    Markdown,
}

/// The bytes ultimately written to the response, plus how they were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub bytes: Vec<u8>,
    pub kind: ContentKind,
}

/// Render file bytes for the given matched extension.
///
/// Markdown files are converted to an HTML fragment; the conversion is pure
/// and deterministic, and it never fails — invalid UTF-8 is replaced
/// lossily and unparseable markdown comes out as literal text rather than
/// failing the request. Every other extension is passed through untouched.
pub fn render(raw: Vec<u8>, extension: &str) -> RenderedContent {
    if extension == MARKDOWN_EXTENSION {
        RenderedContent {
            bytes: markdown_to_html(&raw).into_bytes(),
            kind: ContentKind::Markdown,
        }
    } else {
        RenderedContent {
            bytes: raw,
            kind: ContentKind::Raw,
        }
    }
}

fn markdown_to_html(raw: &[u8]) -> String {
    let source = String::from_utf8_lossy(raw);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(&source, options);
    let mut out = String::with_capacity(source.len() * 2);
    html::push_html(&mut out, parser);
    out
}
