use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::DemoBookingId;
use gurukul_models::{Board, ClassMode};

/// A demo class request from the public site. No account or session is
/// involved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DemoBooking {
    pub id: DemoBookingId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub board: Board,
    pub preferred_mode: ClassMode,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookDemoDto {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 7))]
    pub phone: String,
    pub board: Board,
    pub preferred_mode: ClassMode,
}
