use thiserror::Error;

/// Errors surfaced by palette extraction and vectorization.
#[derive(Debug, Error)]
pub enum VectorizeError {
    /// A configuration value or input buffer is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No pixel source has been attached to the vectorizer.
    #[error("vectorization backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("invalid configuration document: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VectorizeError>;

pub(crate) fn invalid(msg: impl Into<String>) -> VectorizeError {
    VectorizeError::InvalidParameter(msg.into())
}
