use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the remote service
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Missing or rejected credential pair (HTTP 401)
    #[error("Invalid credentials - authentication failed")]
    InvalidCredentials,

    /// Permission denied (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// Request rejected as invalid (HTTP 400, 422)
    #[error("Request rejected ({0}): {1}")]
    Rejected(StatusCode, String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,

    /// Server error (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Unknown or unexpected status
    #[error("Unexpected response ({0}): {1}")]
    Unexpected(StatusCode, String),
}

impl RemoteError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::InvalidCredentials,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Rejected(status, body)
            }
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            status if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::Unexpected(status, body),
        }
    }

    /// Returns true if this error is transient and should be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited | Self::ServerError(_, _) => true,
            Self::Network(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            _ => false,
        }
    }

    /// Returns true if this is a permanent error that should not be retried
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::Forbidden(_) | Self::NotFound | Self::Rejected(_, _)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            RemoteError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            RemoteError::InvalidCredentials
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            RemoteError::RateLimited
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "dup".to_string()),
            RemoteError::Rejected(StatusCode::UNPROCESSABLE_ENTITY, _)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            RemoteError::ServerError(StatusCode::BAD_GATEWAY, _)
        ));
        assert!(matches!(
            RemoteError::from_status(StatusCode::IM_A_TEAPOT, String::new()),
            RemoteError::Unexpected(_, _)
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(RemoteError::RateLimited.is_transient());
        assert!(
            RemoteError::ServerError(StatusCode::SERVICE_UNAVAILABLE, "down".to_string())
                .is_transient()
        );
    }

    #[test]
    fn test_error_exclusivity() {
        let rate_limited = RemoteError::RateLimited;
        assert!(rate_limited.is_transient());
        assert!(!rate_limited.is_permanent());

        let denied = RemoteError::Forbidden("banned".to_string());
        assert!(!denied.is_transient());
        assert!(denied.is_permanent());
    }
}
