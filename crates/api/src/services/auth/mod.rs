//! Authentication service.
//!
//! Registration, login, password hashing, and bearer-token handling.

mod error;
pub mod token;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::SecretString;
use serde::Serialize;
use sqlx::PgPool;

use matjar_core::{Email, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::FieldError;
use crate::models::user::User;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The authenticated caller, as proven by a bearer token.
///
/// Passed explicitly into every protected operation; there is no ambient
/// "current user" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// Authentication service.
///
/// Handles user registration and login, and issues bearer tokens.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    jwt_secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a SecretString) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_secret,
        }
    }

    /// Register a new user and issue a token for it.
    ///
    /// The requested role is honored when it is literally `"admin"`; this is
    /// how the back-office creates further admin accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if name/email/password fail format
    /// constraints.
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        requested_role: Option<&str>,
    ) -> Result<(String, User), AuthError> {
        let email = validate_registration(name, email, password)?;

        let password_hash = hash_password(password)?;
        let role = if requested_role == Some("admin") {
            Role::Admin
        } else {
            Role::User
        };

        let user = User {
            id: UserId::generate(),
            name: name.trim().to_owned(),
            email,
            password_hash,
            role,
            address: None,
            phone: None,
            created_at: chrono::Utc::now(),
        };

        self.users.create(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        })?;

        let token = token::issue(self.jwt_secret, user.id, user.role)?;
        Ok((token, user))
    }

    /// Login with email and password, issuing a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email and for a
    /// wrong password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AuthError> {
        // A malformed email can never match a stored (validated) one, so it
        // collapses into the same non-distinguishing failure.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        let token = token::issue(self.jwt_secret, user.id, user.role)?;
        Ok((token, user))
    }
}

/// Validate registration input, returning the parsed email on success.
///
/// All field failures are collected into one error so the client can show
/// them together.
fn validate_registration(name: &str, email: &str, password: &str) -> Result<Email, AuthError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    }

    let parsed = match Email::parse(email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(FieldError::new("email", e.to_string()));
            None
        }
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }

    match (parsed, errors.is_empty()) {
        (Some(email), true) => Ok(email),
        _ => Err(AuthError::Validation(errors)),
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` on mismatch or an unparseable
/// hash.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_password("user123").unwrap();
        assert_ne!(hash, "user123");
        assert!(verify_password("user123", &hash).is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("user123").unwrap();
        assert!(matches!(
            verify_password("user124", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("user123", "plaintext-not-a-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_registration_ok() {
        let email = validate_registration("Demo", "Demo@Example.com", "secret1").unwrap();
        assert_eq!(email.as_str(), "demo@example.com");
    }

    #[test]
    fn test_validate_registration_collects_all_failures() {
        let err = validate_registration("  ", "nope", "123").unwrap_err();
        let AuthError::Validation(errors) = err else {
            panic!("expected validation error");
        };

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["name", "email", "password"]);
    }

    #[test]
    fn test_validate_registration_password_boundary() {
        assert!(validate_registration("Demo", "d@e.com", "12345").is_err());
        assert!(validate_registration("Demo", "d@e.com", "123456").is_ok());
    }
}
