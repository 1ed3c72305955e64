use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{BatchId, SubmissionId, TaskId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: TaskId,
    pub batch_id: BatchId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub created_by: Option<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One student's state on one task. At most one row per (task, student),
/// maintained by upsert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaskSubmission {
    pub id: SubmissionId,
    pub task_id: TaskId,
    pub student_id: UserId,
    pub is_completed: bool,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SubmissionWithStudent {
    pub id: SubmissionId,
    pub student_id: UserId,
    pub full_name: String,
    pub is_completed: bool,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<i32>,
}

/// A task as a student sees it, with their own submission state folded in.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TaskWithSubmission {
    pub id: TaskId,
    pub batch_id: BatchId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub is_completed: Option<bool>,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub grade: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaskDto {
    pub batch_id: BatchId,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// Completion toggle; calling it twice keeps a single row with the latest
/// value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitTaskDto {
    pub is_completed: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GradeSubmissionDto {
    #[validate(range(min = 0, max = 100))]
    pub grade: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskFilterParams {
    pub batch_id: Option<BatchId>,
}
