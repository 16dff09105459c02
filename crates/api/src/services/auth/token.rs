//! Bearer token signing and verification.
//!
//! Tokens are HS256 JWTs carrying the user id and role, valid for seven
//! days from issue.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use matjar_core::{Role, UserId};

use super::{AuthError, Identity};

/// Validity window of issued tokens.
pub const TOKEN_VALIDITY_DAYS: i64 = 7;

/// Claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's id.
    pub sub: UserId,
    /// The role the user held at issue time.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Sign a token for the given user.
///
/// # Errors
///
/// Returns `AuthError::TokenCreation` if signing fails.
pub fn issue(secret: &SecretString, user_id: UserId, role: Role) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|_| AuthError::TokenCreation)
}

/// Verify a token and extract the caller's identity.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if the token is malformed, carries a
/// bad signature, or has expired.
pub fn verify(secret: &SecretString, token: &str) -> Result<Identity, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(Identity {
        user_id: data.claims.sub,
        role: data.claims.role,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret() -> SecretString {
        SecretString::from("unit-test-signing-secret-0123456789abcdef")
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let user_id = UserId::generate();
        let token = issue(&secret(), user_id, Role::Admin).unwrap();

        let identity = verify(&secret(), &token).unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue(&secret(), UserId::generate(), Role::User).unwrap();
        let other = SecretString::from("a-completely-different-signing-secret!!");

        assert!(matches!(
            verify(&other, &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let token = issue(&secret(), UserId::generate(), Role::User).unwrap();
        let mut tampered = token;
        tampered.pop();
        tampered.push('x');

        assert!(matches!(
            verify(&secret(), &tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(
            verify(&secret(), "not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let now = Utc::now();
        let claims = Claims {
            sub: UserId::generate(),
            role: Role::User,
            iat: (now - Duration::days(8)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret().expose_secret().as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify(&secret(), &token),
            Err(AuthError::InvalidToken)
        ));
    }
}
