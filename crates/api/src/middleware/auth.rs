//! Authentication extractors.
//!
//! Handlers declare their access requirement by taking [`RequireAuth`] or
//! [`RequireAdmin`] as an argument; the caller's [`Identity`] is passed
//! explicitly into the handler rather than living in ambient state.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::services::auth::{AuthError, Identity, token};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Rejects with 401 when the token is absent, malformed, or expired.
///
/// # Example
///
/// ```rust,ignore
/// async fn my_orders(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("orders for {}", identity.user_id)
/// }
/// ```
pub struct RequireAuth(pub Identity);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = bearer_token(parts)?;
        let identity = token::verify(state.jwt_secret(), token)?;

        Ok(Self(identity))
    }
}

/// Extractor that additionally requires the admin role.
///
/// Rejects with 401 for token problems and 403 for a valid token whose role
/// is not admin.
pub struct RequireAdmin(pub Identity);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(identity) = RequireAuth::from_request_parts(parts, state).await?;

        if !identity.role.is_admin() {
            return Err(AppError::Forbidden("admin access required".to_owned()));
        }

        Ok(Self(identity))
    }
}

/// Pull the token out of the `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingToken)
}
