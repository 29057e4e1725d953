//! Client error types.

use thiserror::Error;

/// Errors from the endpoint client.
///
/// None of these are fatal: a failed call rejects that one request and the
/// caller's draft and chat history stay untouched.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request was never worth sending (empty transcript, non-positive
    /// payment amount).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The transport failed or the response body did not parse.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Endpoint error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The endpoint answered 200 but the payload was unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClientError::InvalidRequest("transcript must not be empty".to_string());
        assert_eq!(err.to_string(), "Invalid request: transcript must not be empty");

        let err = ClientError::Api {
            status: 400,
            message: "Incomplete invoice data".to_string(),
        };
        assert_eq!(err.to_string(), "Endpoint error (400): Incomplete invoice data");
    }
}
