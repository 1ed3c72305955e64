use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{BatchId, UserId};
use gurukul_models::Board;

/// The academic record linked one-to-one with a profile, joined with that
/// profile as the dashboards consume it. Board and grade are the student's
/// own and may differ from the batch's.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentWithProfile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub board: Board,
    pub grade: String,
    pub admission_date: Option<NaiveDate>,
    pub batch_id: Option<BatchId>,
    pub parent_id: Option<UserId>,
}

/// Enrollment: creates the account and the student record together.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EnrollStudentDto {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 8))]
    pub password: String,
    pub board: Board,
    #[validate(length(min = 1))]
    pub grade: String,
    pub admission_date: Option<NaiveDate>,
    pub batch_id: Option<BatchId>,
    pub parent_id: Option<UserId>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    pub board: Option<Board>,
    #[validate(length(min = 1))]
    pub grade: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub parent_id: Option<UserId>,
}

/// Batch assignment; `null` unassigns.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignBatchDto {
    pub batch_id: Option<BatchId>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentFilterParams {
    pub batch_id: Option<BatchId>,
}
