use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::{BatchId, TestId, UserId};
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{ensure_any_role, ensure_student_access};
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateTestDto, SaveMarksDto, StudentMarkSummary, Test, TestFilterParams, TestMark,
    TestMarkWithStudent, UpdateTestDto,
};
use super::service::TestService;

/// Schedule a test (staff)
#[utoipa::path(
    post,
    path = "/api/tests",
    request_body = CreateTestDto,
    responses(
        (status = 201, description = "Test created", body = Test),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state, dto))]
pub async fn create_test(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTestDto>,
) -> Result<(StatusCode, Json<Test>), AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let test = TestService::create_test(&state.db, dto).await?;
    state
        .changes
        .publish(EntityKind::Tests, ChangeOp::Created, test.id.into());
    Ok((StatusCode::CREATED, Json(test)))
}

/// List tests, optionally by batch
#[utoipa::path(
    get,
    path = "/api/tests",
    params(("batch_id" = Option<BatchId>, Query, description = "Filter by batch")),
    responses(
        (status = 200, description = "Tests", body = [Test])
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state))]
pub async fn get_tests(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<TestFilterParams>,
) -> Result<Json<Vec<Test>>, AppError> {
    let tests = TestService::get_tests(&state.db, params.batch_id).await?;
    Ok(Json(tests))
}

/// Update a test (staff)
#[utoipa::path(
    put,
    path = "/api/tests/{id}",
    params(("id" = TestId, Path, description = "Test ID")),
    request_body = UpdateTestDto,
    responses(
        (status = 200, description = "Updated", body = Test),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state, dto))]
pub async fn update_test(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TestId>,
    ValidatedJson(dto): ValidatedJson<UpdateTestDto>,
) -> Result<Json<Test>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let test = TestService::update_test(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Tests, ChangeOp::Updated, id.into());
    Ok(Json(test))
}

/// Delete a test (staff)
#[utoipa::path(
    delete,
    path = "/api/tests/{id}",
    params(("id" = TestId, Path, description = "Test ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state))]
pub async fn delete_test(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TestId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    TestService::delete_test(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Tests, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Test deleted successfully"})))
}

/// Save the full mark sheet for a test (staff). Replaces whatever was stored.
#[utoipa::path(
    put,
    path = "/api/tests/{id}/marks",
    params(("id" = TestId, Path, description = "Test ID")),
    request_body = SaveMarksDto,
    responses(
        (status = 200, description = "Stored marks", body = [TestMark]),
        (status = 400, description = "Marks out of range or bad sheet", body = ErrorResponse),
        (status = 404, description = "Test not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state, dto))]
pub async fn save_marks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TestId>,
    ValidatedJson(dto): ValidatedJson<SaveMarksDto>,
) -> Result<Json<Vec<TestMark>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let marks = TestService::save_marks(&state.db, id, &dto).await?;
    state
        .changes
        .publish(EntityKind::TestMarks, ChangeOp::Updated, id.into());
    Ok(Json(marks))
}

/// Stored mark sheet for a test (staff)
#[utoipa::path(
    get,
    path = "/api/tests/{id}/marks",
    params(("id" = TestId, Path, description = "Test ID")),
    responses(
        (status = 200, description = "Marks", body = [TestMarkWithStudent]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state))]
pub async fn get_marks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TestId>,
) -> Result<Json<Vec<TestMarkWithStudent>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let marks = TestService::get_marks_for_test(&state.db, id).await?;
    Ok(Json(marks))
}

/// A student's marks with grade bands (self, parent, or staff)
#[utoipa::path(
    get,
    path = "/api/tests/student/{student_id}/marks",
    params(("student_id" = UserId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Marks", body = [StudentMarkSummary]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tests"
)]
#[instrument(skip(state))]
pub async fn get_student_marks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<UserId>,
) -> Result<Json<Vec<StudentMarkSummary>>, AppError> {
    ensure_student_access(&state.db, auth_user.user_id()?, student_id).await?;

    let marks = TestService::get_marks_for_student(&state.db, student_id).await?;
    Ok(Json(marks))
}
