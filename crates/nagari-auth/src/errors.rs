//! Authentication error types.

use thiserror::Error;

use nagari_store::StoreError;

/// Errors from credential checks and token handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token was presented.
    #[error("missing bearer token")]
    MissingToken,

    /// The token is malformed or its signature does not verify.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The token was valid but has expired.
    #[error("token expired")]
    TokenExpired,

    /// The token's admin was removed or its password changed after issue.
    #[error("session revoked")]
    SessionRevoked,

    /// Signing a token failed.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// The admin lookup failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_message_is_generic() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
    }

    #[test]
    fn store_error_is_transparent() {
        let err: AuthError = StoreError::validation("x").into();
        assert_eq!(err.to_string(), "Validation error: x");
    }
}
