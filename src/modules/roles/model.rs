use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use gurukul_models::ids::UserId;
use gurukul_models::Role;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignRoleDto {
    pub role: Role,
}

/// A user's complete registry entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserRolesResponse {
    pub user_id: UserId,
    pub roles: Vec<Role>,
}
