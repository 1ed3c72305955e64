//! Registry-backed authorization.
//!
//! Every gate resolves the caller's roles from `user_roles` at check time;
//! nothing is trusted from the token beyond identity. Any failure along the
//! way (missing header, bad token, database error) denies access.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sqlx::PgPool;

use gurukul_models::ids::UserId;
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Does the registry hold (user, role)?
pub async fn has_role(db: &PgPool, user_id: UserId, role: Role) -> Result<bool, AppError> {
    let held = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM user_roles WHERE user_id = $1 AND role = $2)",
    )
    .bind(user_id)
    .bind(role)
    .fetch_one(db)
    .await
    .map_err(AppError::database)?;

    Ok(held)
}

/// All roles the user holds, in no particular order.
pub async fn fetch_roles(db: &PgPool, user_id: UserId) -> Result<Vec<Role>, AppError> {
    let roles = sqlx::query_scalar::<_, Role>("SELECT role FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

    Ok(roles)
}

/// In-handler check: error unless the user holds one of `allowed`.
pub async fn ensure_any_role(
    db: &PgPool,
    user_id: UserId,
    allowed: &[Role],
) -> Result<(), AppError> {
    for role in allowed {
        if has_role(db, user_id, *role).await? {
            return Ok(());
        }
    }

    Err(AppError::forbidden(format!(
        "Access denied. Required one of: {:?}",
        allowed
    )))
}

/// Middleware body shared by the role layers.
async fn require_roles(
    state: AppState,
    req: Request,
    next: Next,
    allowed: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    let user_id = auth_user.user_id()?;

    ensure_any_role(&state.db, user_id, &allowed).await?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Layer for admin-only route groups.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(state, req, next, vec![Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Layer for routes open to admins and teachers.
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(state, req, next, vec![Role::Admin, Role::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Can `requester` read this student's records? True for the student
/// themselves, their linked parent, and staff.
pub async fn can_access_student(
    db: &PgPool,
    requester: UserId,
    student_id: UserId,
) -> Result<bool, AppError> {
    if requester == student_id {
        return Ok(true);
    }

    let is_parent = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM students WHERE id = $1 AND parent_id = $2)",
    )
    .bind(student_id)
    .bind(requester)
    .fetch_one(db)
    .await
    .map_err(AppError::database)?;

    if is_parent {
        return Ok(true);
    }

    if has_role(db, requester, Role::Admin).await? {
        return Ok(true);
    }

    has_role(db, requester, Role::Teacher).await
}

/// Error unless `requester` may read this student's records.
pub async fn ensure_student_access(
    db: &PgPool,
    requester: UserId,
    student_id: UserId,
) -> Result<(), AppError> {
    if can_access_student(db, requester, student_id).await? {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Access denied to this student's records".to_string(),
        ))
    }
}
