//! HTTP request execution error types.
//!
//! Every failure inside a helper is caught once and returned as one of these
//! variants, with the underlying cause kept as the error source.

/// Errors that can occur while executing a request.
///
/// `Transport` and `Status` mean the request itself failed. `Decode` means
/// the request succeeded but the payload was not what the caller asked for.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Network, DNS, TLS, timeout or body-read failure reported by the
    /// transport.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}")]
    Status {
        url: String,
        status: u16,
        /// Response body, decoded lossily as text.
        body: String,
    },

    /// The response was successful but its body was not valid JSON.
    #[error("unexpected response payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request URI could not be parsed.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client or request could not be built.
    #[error("request build error: {0}")]
    Build(String),
}

impl RequestError {
    /// Wraps a transport error, separating builder failures from network ones.
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        if source.is_builder() {
            RequestError::Build(source.to_string())
        } else {
            RequestError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }

    /// `true` if the request failed, as opposed to returning an unexpected
    /// payload.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            RequestError::Transport { .. } | RequestError::Status { .. }
        )
    }

    /// `true` if the transport gave up waiting.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Transport { source, .. } if source.is_timeout())
    }

    /// The HTTP status, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
