use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use gurukul_models::ids::UserId;
use gurukul_models::Role;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{AssignRoleDto, UserRolesResponse};
use super::service::RoleService;

/// Roles a user holds in the registry
#[utoipa::path(
    get,
    path = "/api/roles/{user_id}",
    params(("user_id" = UserId, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Registry entry", body = UserRolesResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn get_user_roles(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<UserRolesResponse>, AppError> {
    let roles = RoleService::get_roles(&state.db, user_id).await?;
    Ok(Json(UserRolesResponse { user_id, roles }))
}

/// Grant a role (idempotent)
#[utoipa::path(
    post,
    path = "/api/roles/{user_id}",
    params(("user_id" = UserId, Path, description = "Profile ID")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Updated registry entry", body = UserRolesResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn assign_role(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(dto): Json<AssignRoleDto>,
) -> Result<Json<UserRolesResponse>, AppError> {
    let roles = RoleService::assign_role(&state.db, user_id, dto.role).await?;
    Ok(Json(UserRolesResponse { user_id, roles }))
}

/// Revoke a role
#[utoipa::path(
    delete,
    path = "/api/roles/{user_id}/{role}",
    params(
        ("user_id" = UserId, Path, description = "Profile ID"),
        ("role" = Role, Path, description = "Role to revoke")
    ),
    responses(
        (status = 200, description = "Updated registry entry", body = UserRolesResponse),
        (status = 404, description = "Role was not held", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Roles"
)]
#[instrument(skip(state))]
pub async fn revoke_role(
    State(state): State<AppState>,
    Path((user_id, role)): Path<(UserId, Role)>,
) -> Result<Json<UserRolesResponse>, AppError> {
    let roles = RoleService::revoke_role(&state.db, user_id, role).await?;
    Ok(Json(UserRolesResponse { user_id, roles }))
}
