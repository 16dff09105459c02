//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::error::FieldError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more registration fields failed format constraints.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The email is already registered.
    #[error("user already exists")]
    EmailTaken,

    /// Unknown email or wrong password. One variant for both cases so the
    /// response cannot be used for user enumeration.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token on the request.
    #[error("missing authentication token")]
    MissingToken,

    /// Token malformed, signature mismatch, or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Token signing failed.
    #[error("token creation failed")]
    TokenCreation,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
