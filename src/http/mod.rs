//! Listener bootstrap.
//!
//! The plain HTTP listener is always started. When TLS is enabled a second,
//! ACME-backed HTTPS listener serves the same router on its own port, with
//! certificates obtained for the configured domain allow-list and cached on
//! disk. Both listeners drain gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
