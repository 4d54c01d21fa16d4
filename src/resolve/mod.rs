//! Request-path resolution.
//!
//! Turning a URL path into a file on disk happens in three steps, each in
//! its own module:
//! - [`sanitize`] maps the path plus one candidate extension to a relative
//!   filesystem path (pure string work, no I/O);
//! - [`secure`] joins that relative path to the content root so the result
//!   provably stays inside it, symlinks included;
//! - [`fallback`] drives both across the configured extension order and
//!   picks the first file that exists.
//!
//! Every candidate, however constructed, passes through [`secure`] — it is
//! the single containment boundary.

pub mod fallback;
pub mod sanitize;
pub mod secure;

pub use fallback::{find_file, ResolvedFile};
