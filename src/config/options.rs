//! Option mutators and the config builder.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::loader::{load_file, ConfigError};
use crate::config::schema::{ServerConfig, ServerParams};
use crate::error::ServerError;

type Mutator = Box<dyn FnOnce(&mut ServerParams) -> Result<(), ConfigError> + Send>;

/// One step of configuration. Applied once, in the order supplied.
pub struct ConfigOption(Mutator);

impl ConfigOption {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut ServerParams) -> Result<(), ConfigError> + Send + 'static,
    {
        Self(Box::new(f))
    }

    pub fn apply(self, params: &mut ServerParams) -> Result<(), ConfigError> {
        (self.0)(params)
    }
}

impl fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfigOption")
    }
}

/// Build an immutable config from `options`.
///
/// Starts from [`ServerParams::default`]. The first failing option aborts:
/// the remaining options are not run and the draft is dropped.
pub fn build_config<I>(options: I) -> Result<ServerConfig, ServerError>
where
    I: IntoIterator<Item = ConfigOption>,
{
    let mut params = ServerParams::default();
    for (index, option) in options.into_iter().enumerate() {
        if let Err(err) = option.apply(&mut params) {
            tracing::debug!(index, error = %err, "Configuration option failed");
            return Err(ServerError::ConfigMutationFailed(err));
        }
    }
    Ok(params.freeze())
}

pub fn with_host(host: impl Into<String>) -> ConfigOption {
    let host = host.into();
    ConfigOption::new(move |params| {
        params.host = host;
        Ok(())
    })
}

pub fn with_port(port: impl Into<String>) -> ConfigOption {
    let port = port.into();
    ConfigOption::new(move |params| {
        params.port = port;
        Ok(())
    })
}

/// Bound used by `graceful_shutdown`. Must be non-zero.
pub fn with_shutdown_timeout(timeout: Duration) -> ConfigOption {
    ConfigOption::new(move |params| {
        if timeout.is_zero() {
            return Err(ConfigError::Invalid("shutdown timeout must be non-zero".into()));
        }
        params.shutdown_timeout = timeout;
        Ok(())
    })
}

/// Per-request timeout enforced by the default middleware. Must be non-zero.
pub fn with_request_timeout(timeout: Duration) -> ConfigOption {
    ConfigOption::new(move |params| {
        if timeout.is_zero() {
            return Err(ConfigError::Invalid("request timeout must be non-zero".into()));
        }
        params.request_timeout = timeout;
        Ok(())
    })
}

pub fn with_cors(enabled: bool) -> ConfigOption {
    ConfigOption::new(move |params| {
        params.cors = enabled;
        Ok(())
    })
}

/// Overlay a TOML file. Fails if the file is missing or malformed.
pub fn with_config_file(path: impl Into<PathBuf>) -> ConfigOption {
    let path = path.into();
    ConfigOption::new(move |params| {
        load_file(&path)?.apply(params)
    })
}

/// Several options applied as one, stopping at the first failure.
pub fn compose<I>(options: I) -> ConfigOption
where
    I: IntoIterator<Item = ConfigOption>,
    I::IntoIter: Send + 'static,
{
    let options = options.into_iter();
    ConfigOption::new(move |params| {
        for option in options {
            option.apply(params)?;
        }
        Ok(())
    })
}
