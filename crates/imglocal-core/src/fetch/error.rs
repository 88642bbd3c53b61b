//! Fetch failure type.

use thiserror::Error;

/// Why an image could not be fetched. Every variant carries the URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (DNS, connect, TLS, timeout, read).
    #[error("{url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// HTTP response had a non-2xx status.
    #[error("{url}: HTTP {status}")]
    Status { url: String, status: u32 },
    /// Server closed the connection before sending the declared body.
    #[error("{url}: truncated body, expected {expected} bytes, got {received}")]
    Truncated {
        url: String,
        expected: u64,
        received: u64,
    },
}

impl FetchError {
    /// Adapter for `map_err` on curl calls made for `url`.
    pub(crate) fn transport(url: &str) -> impl Fn(curl::Error) -> FetchError + Copy + '_ {
        move |source| FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Truncated { url, .. } => url,
        }
    }

    /// The failure without the URL, for lines that already name it.
    pub fn reason(&self) -> String {
        match self {
            _ if self.is_timeout() => "timed out".to_string(),
            FetchError::Transport { source, .. } => source.to_string(),
            FetchError::Status { status, .. } => format!("HTTP {}", status),
            FetchError::Truncated {
                expected, received, ..
            } => format!("truncated body, expected {} bytes, got {}", expected, received),
        }
    }

    /// True when the request ran into the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport { source, .. } if source.is_operation_timedout())
    }
}
