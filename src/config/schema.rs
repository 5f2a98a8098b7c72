//! Configuration schema definitions.
//!
//! [`ServerParams`] is the mutable draft that configuration options write
//! into. [`ServerConfig`] is the frozen result handed to the server.

use std::time::Duration;

use serde::Serialize;

/// Default bound for [`crate::Server::graceful_shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(3);

/// Default per-request timeout applied by the default middleware stack.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Host used when only a port was configured.
const UNSPECIFIED_HOST: &str = "0.0.0.0";

/// Mutable configuration draft.
///
/// Options receive `&mut ServerParams`; the draft is discarded if any option
/// fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerParams {
    pub host: String,
    pub port: String,
    pub shutdown_timeout: Duration,
    pub request_timeout: Duration,
    pub cors: bool,
}

impl Default for ServerParams {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: String::new(),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cors: true,
        }
    }
}

impl ServerParams {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn set_port(&mut self, port: impl Into<String>) {
        self.port = port.into();
    }

    pub(crate) fn freeze(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            shutdown_timeout: self.shutdown_timeout,
            request_timeout: self.request_timeout,
            cors: self.cors,
        }
    }
}

/// Immutable server configuration.
///
/// Only obtainable through [`crate::config::build_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    host: String,
    port: String,
    #[serde(with = "millis")]
    shutdown_timeout: Duration,
    #[serde(with = "millis")]
    request_timeout: Duration,
    cors: bool,
}

impl ServerConfig {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn cors(&self) -> bool {
        self.cors
    }

    /// Address handed to the listener.
    ///
    /// `host:port` when a port is set, otherwise the host verbatim so that a
    /// pre-formatted `ip:port` can be passed as the host. An empty host means
    /// every interface; with neither set the listener takes an ephemeral port.
    pub fn listen_address(&self) -> String {
        match (self.host.is_empty(), self.port.is_empty()) {
            (_, false) => {
                let host = if self.host.is_empty() {
                    UNSPECIFIED_HOST
                } else {
                    self.host.as_str()
                };
                format!("{}:{}", host, self.port)
            }
            (false, true) => self.host.clone(),
            (true, true) => format!("{}:0", UNSPECIFIED_HOST),
        }
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str, port: &str) -> ServerConfig {
        let mut params = ServerParams::default();
        params.set_host(host);
        params.set_port(port);
        params.freeze()
    }

    #[test]
    fn getters_and_setters() {
        let mut params = ServerParams::default();

        params.set_port("8082");
        assert_eq!(params.port(), "8082");

        params.set_host("example.com");
        assert_eq!(params.host(), "example.com");
    }

    #[test]
    fn defaults() {
        let config = ServerParams::default().freeze();
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.cors());
    }

    #[test]
    fn listen_address_joins_host_and_port() {
        assert_eq!(config("localhost", "8080").listen_address(), "localhost:8080");
    }

    #[test]
    fn listen_address_uses_host_alone_without_port() {
        assert_eq!(config("127.0.0.1:9000", "").listen_address(), "127.0.0.1:9000");
    }

    #[test]
    fn listen_address_fills_in_missing_parts() {
        assert_eq!(config("", "8080").listen_address(), "0.0.0.0:8080");
        assert_eq!(config("", "").listen_address(), "0.0.0.0:0");
    }

    #[test]
    fn serializes_timeouts_as_millis() {
        let value = serde_json::to_value(config("h", "1")).unwrap();
        assert_eq!(value["shutdown_timeout"], 3000);
        assert_eq!(value["host"], "h");
    }
}
