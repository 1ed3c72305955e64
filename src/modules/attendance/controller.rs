use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use gurukul_models::ids::{ClassId, UserId};
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{ensure_any_role, ensure_student_access};
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AttendanceRecord, AttendanceSummary, AttendanceWithStudent, SaveAttendanceDto, SummaryParams,
};
use super::service::AttendanceService;

/// Save a class's full roster (staff). Replaces whatever was stored.
#[utoipa::path(
    put,
    path = "/api/attendance/class/{class_id}",
    params(("class_id" = ClassId, Path, description = "Class ID")),
    request_body = SaveAttendanceDto,
    responses(
        (status = 200, description = "Stored roster", body = [AttendanceRecord]),
        (status = 400, description = "Bad roster", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn save_roster(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
    ValidatedJson(dto): ValidatedJson<SaveAttendanceDto>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let records = AttendanceService::save_roster(&state.db, class_id, &dto.records).await?;
    state
        .changes
        .publish(EntityKind::Attendance, ChangeOp::Updated, class_id.into());
    Ok(Json(records))
}

/// Stored roster for a class (staff)
#[utoipa::path(
    get,
    path = "/api/attendance/class/{class_id}",
    params(("class_id" = ClassId, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Roster", body = [AttendanceWithStudent]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_roster(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
) -> Result<Json<Vec<AttendanceWithStudent>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let roster = AttendanceService::get_roster(&state.db, class_id).await?;
    Ok(Json(roster))
}

/// Attendance summary for a student (self, parent, or staff)
#[utoipa::path(
    get,
    path = "/api/attendance/student/{student_id}/summary",
    params(
        ("student_id" = UserId, Path, description = "Student ID"),
        ("window" = Option<String>, Query, description = "day, week, or month")
    ),
    responses(
        (status = 200, description = "Summary", body = AttendanceSummary),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn student_summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<UserId>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<AttendanceSummary>, AppError> {
    ensure_student_access(&state.db, auth_user.user_id()?, student_id).await?;

    let summary =
        AttendanceService::student_summary(&state.db, student_id, params.window).await?;
    Ok(Json(summary))
}
