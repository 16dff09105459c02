//! User administration and self-service routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use matjar_core::UserId;

use crate::db::users::UserRepository;
use crate::error::{AppError, FieldError, Result};
use crate::middleware::{RequireAdmin, RequireAuth};
use crate::models::user::{ProfilePatch, User, UserProfile};
use crate::state::AppState;

/// GET /api/users (admin)
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserProfile>>> {
    let users = UserRepository::new(state.pool()).list().await?;
    Ok(Json(users.iter().map(User::profile).collect()))
}

/// GET /api/users/me
pub async fn me(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

    Ok(Json(user.profile()))
}

/// PUT /api/users/me - partial merge of name/address/phone only.
pub async fn update_me(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<UserProfile>> {
    if let Some(name) = &patch.name
        && name.trim().is_empty()
    {
        return Err(AppError::Validation(vec![FieldError::new(
            "name",
            "name is required",
        )]));
    }

    let user = UserRepository::new(state.pool())
        .update_profile(
            identity.user_id,
            patch.name.as_deref(),
            patch.address.as_deref(),
            patch.phone.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

    Ok(Json(user.profile()))
}

/// DELETE /api/users/{id} (admin)
///
/// Admin accounts cannot be deleted through this path; the rule is enforced
/// here rather than left to the client. The target's orders are kept.
pub async fn remove(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Value>> {
    let users = UserRepository::new(state.pool());

    let target = users
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;

    if target.role.is_admin() {
        return Err(AppError::Forbidden(
            "admin accounts cannot be deleted".to_owned(),
        ));
    }

    users.delete(id).await?;
    Ok(Json(json!({ "message": "user deleted" })))
}
