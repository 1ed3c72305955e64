use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{BatchId, ClassId};

/// A scheduled session for a batch. Attendance and notes hang off this.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassSession {
    pub id: ClassId,
    pub batch_id: BatchId,
    pub subject: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: Option<i32>,
    pub meet_link: Option<String>,
    pub is_completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    pub batch_id: BatchId,
    #[validate(length(min = 1))]
    pub subject: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: Option<i32>,
    #[validate(url)]
    pub meet_link: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1))]
    pub subject: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: Option<i32>,
    #[validate(url)]
    pub meet_link: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClassFilterParams {
    pub batch_id: Option<BatchId>,
    /// Only sessions on or after this date.
    pub from: Option<NaiveDate>,
    /// Only sessions on or before this date.
    pub to: Option<NaiveDate>,
}
