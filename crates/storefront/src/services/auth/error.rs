//! Login error types.

use thiserror::Error;

/// Errors that can occur while logging in against the backend.
///
/// The `Display` text is what the login form shows to the visitor.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The backend rejected the credentials (any non-2xx status).
    #[error("Login failed. Please check your credentials.")]
    LoginFailed {
        /// HTTP status returned by the backend.
        status: u16,
    },

    /// The backend answered 2xx but not with the expected JSON document.
    #[error("Unexpected response from server")]
    UnexpectedResponse,

    /// The request could not be sent or the response could not be read.
    #[error("Could not reach the server. Please try again.")]
    Network(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failed_message() {
        let err = LoginError::LoginFailed { status: 401 };
        assert_eq!(
            err.to_string(),
            "Login failed. Please check your credentials."
        );
    }

    #[test]
    fn test_unexpected_response_message() {
        assert_eq!(
            LoginError::UnexpectedResponse.to_string(),
            "Unexpected response from server"
        );
    }
}
