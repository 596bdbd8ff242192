//! HTTP request execution configuration.
//!
//! An [`ExecutionConfig`] is the per-executor snapshot of the settings that
//! shape the transport: timeout, redirect limit, TLS validation and default
//! headers.

use crate::config::{get_config, FetchConfig};
use std::collections::HashMap;
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Maximum time for the whole request, body included.
    pub timeout: Duration,

    /// Maximum redirects followed when following is enabled.
    pub max_redirects: u32,

    /// Whether TLS certificates are validated.
    pub validate_ssl: bool,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// Headers added when the request does not set them.
    pub default_headers: HashMap<String, String>,
}

impl ExecutionConfig {
    /// Creates an ExecutionConfig with the given timeout and default settings
    /// otherwise.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::from(FetchConfig::default())
        }
    }

    /// Creates an ExecutionConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from(get_config())
    }

    /// Sets the redirect limit.
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Sets whether TLS certificates are validated.
    pub fn with_validate_ssl(mut self, validate_ssl: bool) -> Self {
        self.validate_ssl = validate_ssl;
        self
    }

    /// Adds a default header.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }
}

impl Default for ExecutionConfig {
    /// Reads the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}

impl From<FetchConfig> for ExecutionConfig {
    fn from(config: FetchConfig) -> Self {
        Self {
            timeout: config.timeout_duration(),
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
            user_agent: config.user_agent,
            default_headers: config.default_headers,
        }
    }
}
