use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::{FeeId, UserId};
use gurukul_models::{FeeStatus, Role};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{ensure_any_role, ensure_student_access};
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateFeeDto, Fee, FeeFilterParams, FeeTotals, FeeWithStudent, UpdateFeeDto};
use super::service::FeeService;

/// Create a fee (admin)
#[utoipa::path(
    post,
    path = "/api/fees",
    request_body = CreateFeeDto,
    responses(
        (status = 201, description = "Fee created", body = Fee),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn create_fee(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateFeeDto>,
) -> Result<(StatusCode, Json<Fee>), AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let fee = FeeService::create_fee(&state.db, dto).await?;
    state
        .changes
        .publish(EntityKind::Fees, ChangeOp::Created, fee.id.into());
    Ok((StatusCode::CREATED, Json(fee)))
}

/// List all fees, optionally by status (admin)
#[utoipa::path(
    get,
    path = "/api/fees",
    params(("status" = Option<FeeStatus>, Query, description = "Filter by status")),
    responses(
        (status = 200, description = "Fees", body = [FeeWithStudent]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<FeeFilterParams>,
) -> Result<Json<Vec<FeeWithStudent>>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let fees = FeeService::get_fees(&state.db, params.status).await?;
    Ok(Json(fees))
}

/// Fee totals partitioned by status (admin)
#[utoipa::path(
    get,
    path = "/api/fees/totals",
    responses(
        (status = 200, description = "Totals", body = FeeTotals),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_totals(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<FeeTotals>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let totals = FeeService::totals(&state.db, None).await?;
    Ok(Json(totals))
}

/// A student's fees (self, parent, or staff)
#[utoipa::path(
    get,
    path = "/api/fees/student/{student_id}",
    params(("student_id" = UserId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Fees", body = [Fee]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_student_fees(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<UserId>,
) -> Result<Json<Vec<Fee>>, AppError> {
    ensure_student_access(&state.db, auth_user.user_id()?, student_id).await?;

    let fees = FeeService::get_fees_for_student(&state.db, student_id).await?;
    Ok(Json(fees))
}

/// Update a fee (admin)
#[utoipa::path(
    put,
    path = "/api/fees/{id}",
    params(("id" = FeeId, Path, description = "Fee ID")),
    request_body = UpdateFeeDto,
    responses(
        (status = 200, description = "Updated", body = Fee),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state, dto))]
pub async fn update_fee(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FeeId>,
    ValidatedJson(dto): ValidatedJson<UpdateFeeDto>,
) -> Result<Json<Fee>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let fee = FeeService::update_fee(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Fees, ChangeOp::Updated, id.into());
    Ok(Json(fee))
}

/// Delete a fee (admin)
#[utoipa::path(
    delete,
    path = "/api/fees/{id}",
    params(("id" = FeeId, Path, description = "Fee ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn delete_fee(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<FeeId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    FeeService::delete_fee(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Fees, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Fee deleted successfully"})))
}
