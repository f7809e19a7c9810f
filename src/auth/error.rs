//! Authentication error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Token signing failed.
    #[error("Token signing failed: {0}")]
    TokenSigning(String),

    /// Token expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token malformed, tampered with or signed by another key.
    #[error("Invalid token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
