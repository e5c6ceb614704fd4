use boxset_core::ProviderError;

/// Errors that can occur while talking to TMDb.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// Transport failure. The request URL is stripped, since it carries the
    /// API key.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Not found in TMDb: {0}")]
    NotFound(String),

    #[error("Rate limited by TMDb")]
    RateLimit,

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TmdbError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<TmdbError> for ProviderError {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::Http(e) if e.is_timeout() => ProviderError::Timeout,
            TmdbError::Http(e) => ProviderError::http(e.to_string()),
            TmdbError::InvalidApiKey(msg) => ProviderError::Unauthorized(msg),
            TmdbError::NotFound(what) => ProviderError::not_found(what),
            TmdbError::RateLimit => ProviderError::RateLimited,
            other => ProviderError::api(other.to_string()),
        }
    }
}
