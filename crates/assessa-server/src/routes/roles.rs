use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use assessa_auth::identity::{reconcile_role, Session, SessionRole};
use assessa_backend::client::ProfileSync;
use assessa_backend::error::BackendError;
use assessa_core::api_paths::Resource;
use assessa_core::models::user::{Role, User};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoleBody {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HasRole {
    pub has_role: bool,
}

pub async fn check_role(
    Extension(session): Extension<Session>,
    Json(body): Json<RoleBody>,
) -> Json<HasRole> {
    let wanted = body.role.as_deref().and_then(|r| r.parse::<SessionRole>().ok());
    Json(HasRole {
        has_role: wanted.is_some_and(|r| session.has_role(r)),
    })
}

/// The caller's organization role on record. Unknown users have none.
async fn backend_role(state: &AppState, session: &Session) -> Result<Option<Role>, ApiError> {
    match state
        .backend
        .find_one::<User>(Resource::Users, &session.display_name)
        .await
    {
        Ok(user) => Ok(Some(user.role)),
        Err(BackendError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Serialize)]
pub struct RoleUpdated {
    pub message: String,
}

pub async fn set_role(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<RoleBody>,
) -> Result<Json<RoleUpdated>, ApiError> {
    let role: SessionRole = body
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Role is required".to_string()))?
        .parse()?;

    // Promotion needs an existing admin session or an admin backend record.
    let identity = state.identity()?;
    if role == SessionRole::Admin
        && !session.has_role(SessionRole::Admin)
        && backend_role(&state, &session).await? != Some(Role::Admin)
    {
        tracing::warn!(user = %session.user_id, "refused self-promotion to admin");
        return Err(ApiError::Forbidden("only administrators can grant the admin role".to_string()));
    }

    identity.set_role(&session.user_id, role).await?;
    Ok(Json(RoleUpdated {
        message: format!("Role updated to {role}"),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciled {
    pub changed: bool,
    pub role: Option<SessionRole>,
}

/// Align the caller's session role with their backend record: backend
/// admins become session admins, everyone else is demoted to user.
pub async fn reconcile(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Reconciled>, ApiError> {
    match reconcile_role(backend_role(&state, &session).await?, session.role) {
        Some(role) => {
            state.identity()?.set_role(&session.user_id, role).await?;
            Ok(Json(Reconciled {
                changed: true,
                role: Some(role),
            }))
        }
        None => Ok(Json(Reconciled {
            changed: false,
            role: session.role,
        })),
    }
}

#[derive(Debug, Serialize)]
pub struct Synced {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

pub async fn sync_profile(
    State(state): State<AppState>,
    Json(profile): Json<ProfileSync>,
) -> Result<Json<Synced>, ApiError> {
    let data = state.backend.sync_profile(&profile).await?;
    Ok(Json(Synced {
        success: true,
        message: "User data synchronized successfully".to_string(),
        data,
    }))
}
