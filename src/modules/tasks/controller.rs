use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::{BatchId, TaskId, UserId};
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::{ensure_any_role, ensure_student_access};
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateTaskDto, GradeSubmissionDto, SubmissionWithStudent, SubmitTaskDto, Task,
    TaskFilterParams, TaskSubmission, TaskWithSubmission, UpdateTaskDto,
};
use super::service::TaskService;

/// Create a task (staff)
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state, dto))]
pub async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTaskDto>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let user_id = auth_user.user_id()?;
    ensure_any_role(&state.db, user_id, &[Role::Admin, Role::Teacher]).await?;

    let task = TaskService::create_task(&state.db, dto, user_id).await?;
    state
        .changes
        .publish(EntityKind::Tasks, ChangeOp::Created, task.id.into());
    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks, optionally by batch
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(("batch_id" = Option<BatchId>, Query, description = "Filter by batch")),
    responses(
        (status = 200, description = "Tasks", body = [Task])
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state))]
pub async fn get_tasks(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<TaskFilterParams>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = TaskService::get_tasks(&state.db, params.batch_id).await?;
    Ok(Json(tasks))
}

/// Tasks for a student with their submission state (self, parent, or staff)
#[utoipa::path(
    get,
    path = "/api/tasks/student/{student_id}",
    params(("student_id" = UserId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Tasks with submission state", body = [TaskWithSubmission]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state))]
pub async fn get_student_tasks(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<UserId>,
) -> Result<Json<Vec<TaskWithSubmission>>, AppError> {
    ensure_student_access(&state.db, auth_user.user_id()?, student_id).await?;

    let tasks = TaskService::get_tasks_for_student(&state.db, student_id).await?;
    Ok(Json(tasks))
}

/// Update a task (staff)
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = TaskId, Path, description = "Task ID")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Updated", body = Task),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state, dto))]
pub async fn update_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TaskId>,
    ValidatedJson(dto): ValidatedJson<UpdateTaskDto>,
) -> Result<Json<Task>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let task = TaskService::update_task(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Tasks, ChangeOp::Updated, id.into());
    Ok(Json(task))
}

/// Delete a task (staff)
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = TaskId, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state))]
pub async fn delete_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    TaskService::delete_task(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Tasks, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Task deleted successfully"})))
}

/// Toggle the calling student's completion state on a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}/submission",
    params(("id" = TaskId, Path, description = "Task ID")),
    request_body = SubmitTaskDto,
    responses(
        (status = 200, description = "Submission state", body = TaskSubmission),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state))]
pub async fn submit_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TaskId>,
    Json(dto): Json<SubmitTaskDto>,
) -> Result<Json<TaskSubmission>, AppError> {
    let user_id = auth_user.user_id()?;
    ensure_any_role(&state.db, user_id, &[Role::Student]).await?;

    let submission =
        TaskService::upsert_submission(&state.db, id, user_id, dto.is_completed).await?;
    state.changes.publish(
        EntityKind::TaskSubmissions,
        ChangeOp::Updated,
        submission.id.into(),
    );
    Ok(Json(submission))
}

/// Submissions for a task (staff)
#[utoipa::path(
    get,
    path = "/api/tasks/{id}/submissions",
    params(("id" = TaskId, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Submissions", body = [SubmissionWithStudent]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state))]
pub async fn get_submissions(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Json<Vec<SubmissionWithStudent>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let submissions = TaskService::get_submissions_for_task(&state.db, id).await?;
    Ok(Json(submissions))
}

/// Grade a student's submission (staff)
#[utoipa::path(
    put,
    path = "/api/tasks/{id}/submissions/{student_id}/grade",
    params(
        ("id" = TaskId, Path, description = "Task ID"),
        ("student_id" = UserId, Path, description = "Student ID")
    ),
    request_body = GradeSubmissionDto,
    responses(
        (status = 200, description = "Graded", body = TaskSubmission),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tasks"
)]
#[instrument(skip(state))]
pub async fn grade_submission(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, student_id)): Path<(TaskId, UserId)>,
    ValidatedJson(dto): ValidatedJson<GradeSubmissionDto>,
) -> Result<Json<TaskSubmission>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let submission = TaskService::grade_submission(&state.db, id, student_id, dto.grade).await?;
    state.changes.publish(
        EntityKind::TaskSubmissions,
        ChangeOp::Updated,
        submission.id.into(),
    );
    Ok(Json(submission))
}
