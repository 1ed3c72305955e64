use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_core::{PaginationMeta, PaginationParams};
use gurukul_models::ids::UserId;
use gurukul_models::Role;

/// One account. `role` is the legacy denormalized display role; the
/// registry (`user_roles`) is what gates access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileFilterParams {
    /// Filter by a role held in the registry.
    pub role: Option<Role>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProfilesResponse {
    pub data: Vec<Profile>,
    pub meta: PaginationMeta,
}
