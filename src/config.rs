//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines the fixed
//! response bodies, default paths, and logging defaults. `AppConfig` is the
//! root configuration struct; it is built once at startup, validated, and
//! never mutated afterwards.

use const_format::formatcp;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Fixed Response Bodies
// =============================================================================
// Every response body starts with the same charset prelude so browsers pick
// UTF-8 regardless of what the served file declares.

/// Prelude prepended to every response body.
pub const HTML_PRELUDE: &str = r#"<!doctype html><meta charset="utf-8">"#;

/// Content type sent with every successful response.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Body for ordinary misses, rejected methods, and traversal attempts.
/// Traversal shares this body so the client cannot probe for the boundary.
pub const NOT_FOUND_BODY: &str = formatcp!("{}<h1>Page not found</h1>", HTML_PRELUDE);

/// Prefix of the 500 body; the error description is appended at runtime.
pub const INTERNAL_ERROR_BODY: &str =
    formatcp!("{}<h1>Internal server error</h1><hr>", HTML_PRELUDE);

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "quire=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// The extension whose files are rendered from markdown to HTML.
pub const MARKDOWN_EXTENSION: &str = "md";

/// Seconds to wait for open connections to drain on shutdown.
pub const SHUTDOWN_DRAIN_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Plain HTTP listener
    #[serde(default)]
    pub http: HttpConfig,
    /// Optional ACME-backed HTTPS listener
    #[serde(default)]
    pub tls: TlsConfig,
    /// Content directory and extension fallback order
    pub content: ContentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Plain HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "HttpConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpConfig::default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }
}

/// HTTPS listener configuration. Disabled unless `enabled = true`; when
/// enabled, certificates are obtained via ACME for the listed domains and
/// cached on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "TlsConfig::default_port")]
    pub port: u16,
    /// Domains certificates may be issued for. Requests for any other SNI
    /// host are refused by the certificate provider.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Directory where issued certificates are cached across restarts.
    #[serde(default = "TlsConfig::default_cache_dir")]
    pub cache_dir: String,
    /// ACME account contact, e.g. "admin@example.org".
    pub email: Option<String>,
    /// Use the production directory. The staging directory issues
    /// certificates browsers will not trust.
    #[serde(default)]
    pub production: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: Self::default_port(),
            domains: Vec::new(),
            cache_dir: Self::default_cache_dir(),
            email: None,
            production: false,
        }
    }
}

impl TlsConfig {
    fn default_port() -> u16 {
        443
    }

    fn default_cache_dir() -> String {
        "acme-cache".to_string()
    }
}

/// Content directory and extension fallback order.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Directory files are served from. Canonicalized at load time; every
    /// resolved file must stay underneath it.
    #[serde(default = "ContentConfig::default_root")]
    pub root: PathBuf,
    /// Extensions tried, in order, for extensionless request paths. The
    /// first extension whose file exists wins.
    #[serde(default = "ContentConfig::default_extensions")]
    pub extensions: Vec<String>,
}

impl ContentConfig {
    fn default_root() -> PathBuf {
        PathBuf::from("data")
    }

    fn default_extensions() -> Vec<String> {
        vec!["html".to_string(), "md".to_string()]
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validated()
    }

    /// Validate the parsed configuration and canonicalize the content root.
    fn validated(mut self) -> Result<Self, ConfigError> {
        if !self.content.root.is_dir() {
            return Err(ConfigError::Validation(format!(
                "content.root '{}' is not a directory",
                self.content.root.display()
            )));
        }
        self.content.root = self.content.root.canonicalize()?;

        if self.content.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.extensions must list at least one extension".to_string(),
            ));
        }
        for ext in &self.content.extensions {
            if ext.is_empty() || ext.contains(['.', '/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "content.extensions entry '{ext}' must be a bare extension like \"html\""
                )));
            }
        }

        if self.tls.enabled && self.tls.domains.is_empty() {
            return Err(ConfigError::Validation(
                "tls.enabled requires at least one entry in tls.domains".to_string(),
            ));
        }

        Ok(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("quire.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("site")).unwrap();
        let path = write_config(
            &dir,
            &format!(
                "[content]\nroot = \"{}\"\n",
                dir.path().join("site").display()
            ),
        );

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.http.port, 3000);
        assert!(!config.tls.enabled);
        assert_eq!(config.content.extensions, vec!["html", "md"]);
        assert!(config.content.root.is_absolute());
    }

    #[test]
    fn rejects_missing_content_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[content]\nroot = \"/no/such/dir\"\n");

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_empty_extension_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            &format!(
                "[content]\nroot = \"{}\"\nextensions = []\n",
                dir.path().display()
            ),
        );

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_dotted_extension_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            &format!(
                "[content]\nroot = \"{}\"\nextensions = [\".html\"]\n",
                dir.path().display()
            ),
        );

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_tls_without_domains() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            &format!(
                "[content]\nroot = \"{}\"\n\n[tls]\nenabled = true\n",
                dir.path().display()
            ),
        );

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
