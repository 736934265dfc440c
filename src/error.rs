//! API Errors
//!
//! Failures surfaced by the task backend client.

/// Result alias for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    Request { status: u16 },
    /// A 2xx response whose body was not the expected JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code for `Request` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status } => Some(*status),
            _ => None,
        }
    }
}
