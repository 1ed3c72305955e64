use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::BatchId;
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Batch, BatchWithCount, CreateBatchDto, UpdateBatchDto};
use super::service::BatchService;

/// Create a batch (admin)
#[utoipa::path(
    post,
    path = "/api/batches",
    request_body = CreateBatchDto,
    responses(
        (status = 201, description = "Batch created", body = Batch),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state, dto))]
pub async fn create_batch(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateBatchDto>,
) -> Result<(StatusCode, Json<Batch>), AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let batch = BatchService::create_batch(&state.db, dto).await?;
    state
        .changes
        .publish(EntityKind::Batches, ChangeOp::Created, batch.id.into());
    Ok((StatusCode::CREATED, Json(batch)))
}

/// List batches with student counts (staff)
#[utoipa::path(
    get,
    path = "/api/batches",
    responses(
        (status = 200, description = "Batches", body = [BatchWithCount])
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batches(
    State(state): State<AppState>,
) -> Result<Json<Vec<BatchWithCount>>, AppError> {
    let batches = BatchService::get_batches(&state.db).await?;
    Ok(Json(batches))
}

/// Fetch one batch
#[utoipa::path(
    get,
    path = "/api/batches/{id}",
    params(("id" = BatchId, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Batch", body = Batch),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<BatchId>,
) -> Result<Json<Batch>, AppError> {
    let batch = BatchService::get_batch(&state.db, id).await?;
    Ok(Json(batch))
}

/// Update a batch (admin)
#[utoipa::path(
    put,
    path = "/api/batches/{id}",
    params(("id" = BatchId, Path, description = "Batch ID")),
    request_body = UpdateBatchDto,
    responses(
        (status = 200, description = "Updated", body = Batch),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state, dto))]
pub async fn update_batch(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BatchId>,
    ValidatedJson(dto): ValidatedJson<UpdateBatchDto>,
) -> Result<Json<Batch>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let batch = BatchService::update_batch(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Batches, ChangeOp::Updated, id.into());
    Ok(Json(batch))
}

/// Delete a batch (admin)
#[utoipa::path(
    delete,
    path = "/api/batches/{id}",
    params(("id" = BatchId, Path, description = "Batch ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Batches"
)]
#[instrument(skip(state))]
pub async fn delete_batch(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<BatchId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    BatchService::delete_batch(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Batches, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Batch deleted successfully"})))
}
