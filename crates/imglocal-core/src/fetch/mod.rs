//! Single-shot HTTP(S) GET for image bytes.
//!
//! Uses the curl crate (libcurl) easy interface. One attempt per URL: the
//! caller decides what a failure means for the reference being rewritten.

mod error;

pub use error::FetchError;

use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Browser-like `User-Agent`; some image hosts reject requests without one.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/124.0 Safari/537.36";

const MAX_REDIRECTS: u32 = 10;

/// Request settings shared by every fetch in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Bound on the whole transfer (connect + body).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Body and declared type of a successfully fetched image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Raw `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
}

/// Source of image bytes. The rewriter only depends on this trait.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

/// libcurl-backed fetcher. Blocks the current thread for the whole transfer.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: FetchOptions,
}

impl CurlFetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    fn perform(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let transport = FetchError::transport(url);
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.get(true).map_err(transport)?;
        easy.useragent(&self.options.user_agent).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.max_redirections(MAX_REDIRECTS).map_err(transport)?;
        easy.timeout(self.options.timeout).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let code = easy.response_code().map_err(transport)?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: code,
            });
        }

        // -1.0 when the server sent no Content-Length.
        let declared_len = easy.content_length_download().map_err(transport)?;
        if declared_len >= 0.0 && (body.len() as f64) < declared_len {
            return Err(FetchError::Truncated {
                url: url.to_string(),
                expected: declared_len as u64,
                received: body.len() as u64,
            });
        }

        let content_type = easy.content_type().map_err(transport)?.map(str::to_string);
        Ok(FetchedImage {
            bytes: body,
            content_type,
        })
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        tracing::debug!("GET {}", url);
        self.perform(url)
    }
}
