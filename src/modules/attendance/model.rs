use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_core::metrics::SummaryWindow;
use gurukul_models::ids::{AttendanceId, ClassId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub class_id: ClassId,
    pub student_id: UserId,
    pub is_present: bool,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

/// Roster row joined with the student's name, as the marking screen shows it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceWithStudent {
    pub id: AttendanceId,
    pub student_id: UserId,
    pub full_name: String,
    pub is_present: bool,
    pub marked_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceEntryDto {
    pub student_id: UserId,
    pub is_present: bool,
}

/// The full roster for one class. Saving replaces whatever was stored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SaveAttendanceDto {
    pub records: Vec<AttendanceEntryDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SummaryParams {
    /// Calendar window; omitted means all records.
    pub window: Option<SummaryWindow>,
}

/// Present/total counts and the derived percentage for one student.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceSummary {
    pub student_id: UserId,
    pub window: Option<SummaryWindow>,
    pub total: i64,
    pub present: i64,
    pub percentage: f64,
}
