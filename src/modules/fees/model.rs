use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{FeeId, UserId};
use gurukul_models::FeeStatus;

/// A fee installment. Status is set explicitly by admins; it never flips to
/// overdue on its own.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Fee {
    pub id: FeeId,
    pub student_id: UserId,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: FeeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fee joined with the student's name for the admin table.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FeeWithStudent {
    pub id: FeeId,
    pub student_id: UserId,
    pub full_name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: FeeStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeeDto {
    pub student_id: UserId,
    #[validate(range(min = 0.01))]
    pub amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFeeDto {
    #[validate(range(min = 0.01))]
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub status: Option<FeeStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeeFilterParams {
    pub status: Option<FeeStatus>,
}

/// Sums partitioned by status.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeeTotals {
    pub pending: f64,
    pub paid: f64,
    pub overdue: f64,
    pub total: f64,
}
