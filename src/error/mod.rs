//! Unified error handling for the snooze client.
//!
//! Every fallible operation in this crate reports failure through
//! [`SnoozeError`], so callers see one convention instead of a mix of
//! string returns, raised errors, and silently swallowed failures:
//!
//! - **Validation**: client-side checks that reject a request before any
//!   network call is made
//! - **Api**: transport, decode, and HTTP-status failures from the remote
//!   service
//! - **Credentials**: local persistence of the session pair
//!
//! The one sanctioned deviation is session restore
//! ([`crate::models::User::login_via_stored_credentials`]), which resolves
//! to "no session" instead of an error when the stored token is rejected.

use std::fmt;

use crate::api::ApiError;
use crate::traits::CredentialStoreError;

/// Type alias for Results using [`SnoozeError`].
pub type SnoozeResult<T> = Result<T, SnoozeError>;

/// Unified error type for all snooze operations.
#[derive(Debug)]
pub enum SnoozeError {
    /// A client-side precondition failed; no request was issued.
    Validation { message: String },

    /// The operation requires a login token and none is present.
    NotAuthenticated,

    /// The remote API call failed (transport, decode, or HTTP status).
    Api(ApiError),

    /// Local credential storage failed.
    Credentials(CredentialStoreError),
}

impl SnoozeError {
    /// Convenience constructor for validation failures.
    pub fn validation(message: impl Into<String>) -> Self {
        SnoozeError::Validation {
            message: message.into(),
        }
    }

    /// Check if this error is likely transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            SnoozeError::Validation { .. } => false,
            SnoozeError::NotAuthenticated => false,
            SnoozeError::Api(e) => e.is_retryable(),
            SnoozeError::Credentials(_) => false,
        }
    }

    /// Check if this error might be resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            SnoozeError::NotAuthenticated => true,
            SnoozeError::Api(ApiError::Server { status, .. }) => *status == 401,
            _ => false,
        }
    }

    /// Get a message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            SnoozeError::Validation { message } => message.clone(),
            SnoozeError::NotAuthenticated => {
                "You are not signed in. Please sign in to continue.".to_string()
            }
            SnoozeError::Api(e) => e.user_message(),
            SnoozeError::Credentials(_) => {
                "Could not access your saved session. Please sign in again.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SnoozeError::Validation { .. } => "E_VALIDATION",
            SnoozeError::NotAuthenticated => "E_NOT_AUTH",
            SnoozeError::Api(e) => e.error_code(),
            SnoozeError::Credentials(_) => "E_CRED_STORE",
        }
    }
}

impl fmt::Display for SnoozeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnoozeError::Validation { message } => write!(f, "Validation failed: {}", message),
            SnoozeError::NotAuthenticated => write!(f, "Not authenticated"),
            SnoozeError::Api(e) => write!(f, "API error: {}", e),
            SnoozeError::Credentials(e) => write!(f, "Credential storage error: {}", e),
        }
    }
}

impl std::error::Error for SnoozeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnoozeError::Api(e) => Some(e),
            SnoozeError::Credentials(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for SnoozeError {
    fn from(e: ApiError) -> Self {
        SnoozeError::Api(e)
    }
}

impl From<CredentialStoreError> for SnoozeError {
    fn from(e: CredentialStoreError) -> Self {
        SnoozeError::Credentials(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_constructor() {
        let err = SnoozeError::validation("title must not be empty");
        assert!(matches!(err, SnoozeError::Validation { .. }));
        assert_eq!(err.user_message(), "title must not be empty");
        assert_eq!(err.error_code(), "E_VALIDATION");
    }

    #[test]
    fn test_validation_not_retryable() {
        assert!(!SnoozeError::validation("bad input").is_retryable());
        assert!(!SnoozeError::validation("bad input").requires_reauth());
    }

    #[test]
    fn test_not_authenticated_requires_reauth() {
        let err = SnoozeError::NotAuthenticated;
        assert!(err.requires_reauth());
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_NOT_AUTH");
    }

    #[test]
    fn test_api_401_requires_reauth() {
        let err: SnoozeError = ApiError::Server {
            status: 401,
            message: "Unauthorized".to_string(),
        }
        .into();
        assert!(err.requires_reauth());
    }

    #[test]
    fn test_api_403_does_not_require_reauth() {
        let err: SnoozeError = ApiError::Server {
            status: 403,
            message: "Forbidden".to_string(),
        }
        .into();
        assert!(!err.requires_reauth());
    }

    #[test]
    fn test_api_5xx_is_retryable() {
        let err: SnoozeError = ApiError::Server {
            status: 503,
            message: "Service Unavailable".to_string(),
        }
        .into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_display_includes_detail() {
        let err = SnoozeError::validation("url must not be empty");
        assert!(err.to_string().contains("url must not be empty"));

        let err: SnoozeError = ApiError::Server {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        let display = err.to_string();
        assert!(display.contains("500"));
        assert!(display.contains("boom"));
    }

    #[test]
    fn test_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(SnoozeError::NotAuthenticated);
        let _ = err.as_ref();
    }
}
