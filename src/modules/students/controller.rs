use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::{BatchId, UserId};
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{ensure_any_role, ensure_student_access};
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AssignBatchDto, EnrollStudentDto, StudentFilterParams, StudentWithProfile, UpdateStudentDto,
};
use super::service::StudentService;

/// Enroll a new student (admin)
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = EnrollStudentDto,
    responses(
        (status = 201, description = "Student enrolled", body = StudentWithProfile),
        (status = 400, description = "Email in use or bad references", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn enroll_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<EnrollStudentDto>,
) -> Result<(StatusCode, Json<StudentWithProfile>), AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let student = StudentService::enroll_student(&state.db, dto).await?;
    state
        .changes
        .publish(EntityKind::Students, ChangeOp::Created, student.id.into());
    Ok((StatusCode::CREATED, Json(student)))
}

/// List students, optionally by batch (staff)
#[utoipa::path(
    get,
    path = "/api/students",
    params(("batch_id" = Option<BatchId>, Query, description = "Filter by batch")),
    responses(
        (status = 200, description = "Students", body = [StudentWithProfile]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StudentFilterParams>,
) -> Result<Json<Vec<StudentWithProfile>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let students = StudentService::get_students(&state.db, params.batch_id).await?;
    Ok(Json(students))
}

/// Children linked to the calling parent
#[utoipa::path(
    get,
    path = "/api/students/children",
    responses(
        (status = 200, description = "Linked children", body = [StudentWithProfile]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_children(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<StudentWithProfile>>, AppError> {
    let user_id = auth_user.user_id()?;
    ensure_any_role(&state.db, user_id, &[Role::Parent]).await?;

    let children = StudentService::get_children(&state.db, user_id).await?;
    Ok(Json(children))
}

/// Fetch one student (self, parent, or staff)
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = UserId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student", body = StudentWithProfile),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<StudentWithProfile>, AppError> {
    ensure_student_access(&state.db, auth_user.user_id()?, id).await?;

    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

/// Update a student's academic record (admin)
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = UserId, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Updated", body = StudentWithProfile),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<StudentWithProfile>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let student = StudentService::update_student(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Students, ChangeOp::Updated, id.into());
    Ok(Json(student))
}

/// Assign (or unassign) a student's batch (admin)
#[utoipa::path(
    put,
    path = "/api/students/{id}/batch",
    params(("id" = UserId, Path, description = "Student ID")),
    request_body = AssignBatchDto,
    responses(
        (status = 200, description = "Updated", body = StudentWithProfile),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn assign_batch(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
    Json(dto): Json<AssignBatchDto>,
) -> Result<Json<StudentWithProfile>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let student = StudentService::assign_batch(&state.db, id, dto.batch_id).await?;
    state
        .changes
        .publish(EntityKind::Students, ChangeOp::Updated, id.into());
    Ok(Json(student))
}

/// Remove a student record (admin)
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = UserId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    StudentService::delete_student(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Students, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Student deleted successfully"})))
}
