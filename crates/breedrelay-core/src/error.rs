//! Error types for breedrelay

/// Result type alias using breedrelay's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for relay operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No image field was supplied with the request
    #[error("no image provided")]
    MissingInput,

    /// Base64 payload is malformed even after padding repair
    #[error("invalid base64 payload: {0}")]
    InvalidEncoding(String),

    /// Decoded bytes are not a parseable image container
    #[error("decoded bytes are not a recognizable image: {0}")]
    InvalidImage(String),

    /// Backend signalled a cold-start/loading condition
    #[error("backend unavailable: {detail}")]
    BackendUnavailable { detail: String },

    /// Backend model identifier is misconfigured or missing upstream
    #[error("backend model not found: {detail}")]
    BackendNotFound { detail: String },

    /// Backend call exceeded the configured deadline
    #[error("backend call timed out")]
    BackendTimeout,

    /// Generic backend failure, with backend-provided detail
    #[error("backend error: {detail}")]
    Backend { detail: String },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new invalid-encoding error
    pub fn invalid_encoding(msg: impl Into<String>) -> Self {
        Self::InvalidEncoding(msg.into())
    }

    /// Create a new invalid-image error
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Create a new backend-unavailable error
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            detail: detail.into(),
        }
    }

    /// Create a new backend-not-found error
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::BackendNotFound {
            detail: detail.into(),
        }
    }

    /// Create a new generic backend error
    pub fn backend(detail: impl Into<String>) -> Self {
        Self::Backend {
            detail: detail.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the caller should be advised to retry later.
    ///
    /// True only for transient backend conditions (cold start, timeout);
    /// the relay itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. } | Self::BackendTimeout)
    }

    /// Whether the failure is attributable to the client's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput | Self::InvalidEncoding(_) | Self::InvalidImage(_)
        )
    }
}
