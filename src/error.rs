use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarneighboursError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("GitHub API returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Failed to decode response from {url}: {source}")]
    DecodeError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl StarneighboursError {
    /// True for failures talking to the upstream API (network, timeout, non-2xx).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StarneighboursError::NetworkError(_)
                | StarneighboursError::UpstreamStatus { .. }
                | StarneighboursError::NotFound(_)
                | StarneighboursError::ApiError(_)
        )
    }

    /// True when the upstream body did not match the expected record shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, StarneighboursError::DecodeError { .. })
    }
}

pub type Result<T> = std::result::Result<T, StarneighboursError>;
