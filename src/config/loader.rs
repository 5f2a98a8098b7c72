//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::config::schema::ServerParams;

/// Error reported by a configuration option.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value: {0}")]
    Invalid(String),
}

/// On-disk TOML layout. Every key is optional; absent keys leave the draft
/// untouched.
///
/// ```toml
/// host = "127.0.0.1"
/// port = "8080"
/// shutdown_timeout_ms = 3000
/// request_timeout_secs = 30
/// cors = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<String>,
    pub shutdown_timeout_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub cors: Option<bool>,
}

impl FileConfig {
    /// Overlay the keys present in the file onto `params`.
    ///
    /// Zero timeouts are rejected before anything is written.
    pub fn apply(self, params: &mut ServerParams) -> Result<(), ConfigError> {
        if self.shutdown_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid("shutdown_timeout_ms must be non-zero".into()));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("request_timeout_secs must be non-zero".into()));
        }

        if let Some(host) = self.host {
            params.host = host;
        }
        if let Some(port) = self.port {
            params.port = port;
        }
        if let Some(ms) = self.shutdown_timeout_ms {
            params.shutdown_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = self.request_timeout_secs {
            params.request_timeout = Duration::from_secs(secs);
        }
        if let Some(cors) = self.cors {
            params.cors = cors;
        }
        Ok(())
    }
}

/// Read and parse a TOML configuration file.
pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "Configuration file loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn overlays_present_keys_only() {
        let file: FileConfig = toml::from_str("port = \"9090\"\ncors = false").unwrap();
        let mut params = ServerParams::default();
        params.set_host("keep.me");

        file.apply(&mut params).unwrap();

        assert_eq!(params.host(), "keep.me");
        assert_eq!(params.port(), "9090");
        assert!(!params.cors);
        assert_eq!(params.shutdown_timeout, Duration::from_secs(3));
    }

    #[test]
    fn load_file_reads_timeouts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "shutdown_timeout_ms = 500\nrequest_timeout_secs = 2").unwrap();

        let config = load_file(file.path()).unwrap();
        assert_eq!(config.shutdown_timeout_ms, Some(500));
        assert_eq!(config.request_timeout_secs, Some(2));
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let mut params = ServerParams::default();

        let file: FileConfig = toml::from_str("port = \"1\"\nrequest_timeout_secs = 0").unwrap();
        let err = file.apply(&mut params).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("request_timeout_secs")));

        let file: FileConfig = toml::from_str("shutdown_timeout_ms = 0").unwrap();
        assert!(matches!(file.apply(&mut params), Err(ConfigError::Invalid(_))));

        assert_eq!(params, ServerParams::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<FileConfig>("listen = \"x\"").unwrap_err();
        assert!(err.to_string().contains("listen"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/routegate.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
