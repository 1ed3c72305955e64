use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{BatchId, UserId};
use gurukul_models::{Board, ClassMode};

/// A named cohort of students sharing board, grade, and mode — the unit of
/// scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Batch {
    pub id: BatchId,
    pub name: String,
    pub board: Board,
    pub grade: String,
    pub mode: ClassMode,
    pub teacher_id: Option<UserId>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Batch plus its enrolled-student count, for the admin overview.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BatchWithCount {
    pub id: BatchId,
    pub name: String,
    pub board: Board,
    pub grade: String,
    pub mode: ClassMode,
    pub teacher_id: Option<UserId>,
    pub teacher_name: Option<String>,
    pub student_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBatchDto {
    #[validate(length(min = 1))]
    pub name: String,
    pub board: Board,
    #[validate(length(min = 1))]
    pub grade: String,
    pub mode: ClassMode,
    pub teacher_id: Option<UserId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBatchDto {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub board: Option<Board>,
    #[validate(length(min = 1))]
    pub grade: Option<String>,
    pub mode: Option<ClassMode>,
    pub teacher_id: Option<UserId>,
}
