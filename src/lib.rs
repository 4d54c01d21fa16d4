//! quire: a small content server.
//!
//! Serves files from one directory over HTTP and, optionally, ACME-backed
//! HTTPS. Extensionless request paths are resolved against an ordered list
//! of candidate extensions, every resolved path is confined to the content
//! root, and markdown files are rendered to HTML on the way out.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod render;
pub mod resolve;
pub mod routes;
pub mod state;
