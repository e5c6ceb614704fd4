use thiserror::Error;

/// Errors a remote metadata provider can report.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Nothing matched the query
    #[error("No match found for '{0}'")]
    NotFound(String),

    /// The request did not complete within its timeout
    #[error("Request timed out")]
    Timeout,

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The provider rejected the API key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The provider asked us to slow down
    #[error("Rate limited by provider")]
    RateLimited,

    /// Unexpected response shape or status
    #[error("API error: {0}")]
    Api(String),
}

impl ProviderError {
    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound(query.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
