use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

use gurukul_models::ids::{BatchId, ClassId};
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{ClassFilterParams, ClassSession, CreateClassDto, UpdateClassDto};
use super::service::ClassService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompleteClassDto {
    pub is_completed: bool,
}

/// Schedule a class (staff)
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class scheduled", body = ClassSession),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<ClassSession>), AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let class = ClassService::create_class(&state.db, dto).await?;
    state
        .changes
        .publish(EntityKind::Classes, ChangeOp::Created, class.id.into());
    Ok((StatusCode::CREATED, Json(class)))
}

/// List classes, filterable by batch and date range
#[utoipa::path(
    get,
    path = "/api/classes",
    params(
        ("batch_id" = Option<BatchId>, Query, description = "Filter by batch"),
        ("from" = Option<String>, Query, description = "Earliest date (YYYY-MM-DD)"),
        ("to" = Option<String>, Query, description = "Latest date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Classes", body = [ClassSession])
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_classes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<ClassFilterParams>,
) -> Result<Json<Vec<ClassSession>>, AppError> {
    let classes =
        ClassService::get_classes(&state.db, params.batch_id, params.from, params.to).await?;
    Ok(Json(classes))
}

/// Fetch one class
#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = ClassId, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class", body = ClassSession),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn get_class(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<ClassId>,
) -> Result<Json<ClassSession>, AppError> {
    let class = ClassService::get_class(&state.db, id).await?;
    Ok(Json(class))
}

/// Update a class (staff)
#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    params(("id" = ClassId, Path, description = "Class ID")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Updated", body = ClassSession),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ClassId>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<ClassSession>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let class = ClassService::update_class(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Classes, ChangeOp::Updated, id.into());
    Ok(Json(class))
}

/// Mark a class completed or not (staff)
#[utoipa::path(
    patch,
    path = "/api/classes/{id}/complete",
    params(("id" = ClassId, Path, description = "Class ID")),
    request_body = CompleteClassDto,
    responses(
        (status = 200, description = "Updated", body = ClassSession),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn complete_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ClassId>,
    Json(dto): Json<CompleteClassDto>,
) -> Result<Json<ClassSession>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let class = ClassService::set_completed(&state.db, id, dto.is_completed).await?;
    state
        .changes
        .publish(EntityKind::Classes, ChangeOp::Updated, id.into());
    Ok(Json(class))
}

/// Delete a class (staff)
#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = ClassId, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ClassId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    ClassService::delete_class(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Classes, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Class deleted successfully"})))
}
