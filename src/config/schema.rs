//! Configuration schema for the HTTP helpers.
//!
//! This module defines the configuration structure and validation logic for
//! the settings that shape every outgoing request.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors raised when a configuration fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `timeout` was zero.
    #[error("timeout must be greater than 0")]
    ZeroTimeout,

    /// `userAgent` was empty or contained characters not allowed in a header.
    #[error("userAgent is not a valid header value: {0:?}")]
    InvalidUserAgent(String),

    /// The settings value could not be deserialized.
    #[error("failed to parse settings: {0}")]
    Parse(String),
}

/// Settings applied to every request made by the HTTP helpers.
///
/// Missing keys fall back to defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchConfig {
    /// Request timeout in milliseconds.
    ///
    /// Covers connecting, sending and reading the full body. Defaults to
    /// 30000ms. Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum number of redirects to follow when following is enabled.
    ///
    /// Defaults to 10. Zero disables following entirely.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates. Defaults to true.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// `User-Agent` sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers added to every request unless the request sets them itself.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            user_agent: default_user_agent(),
            default_headers: HashMap::new(),
        }
    }
}

impl FetchConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let user_agent_ok = !self.user_agent.trim().is_empty()
            && self
                .user_agent
                .bytes()
                .all(|b| b == b'\t' || (0x20..0x7f).contains(&b));
        if !user_agent_ok {
            return Err(ConfigError::InvalidUserAgent(self.user_agent.clone()));
        }

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Merges this configuration with another, using values from `other`.
    ///
    /// Default headers are combined, with `other` winning on conflicts.
    pub fn merge(&self, other: &FetchConfig) -> Self {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(
            other
                .default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            timeout: other.timeout,
            max_redirects: other.max_redirects,
            validate_ssl: other.validate_ssl,
            user_agent: other.user_agent.clone(),
            default_headers,
        }
    }
}

// Default value functions for serde

fn default_timeout() -> u64 {
    30000
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_user_agent() -> String {
    concat!("fetch-utils/", env!("CARGO_PKG_VERSION")).to_string()
}
