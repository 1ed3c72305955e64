use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::Role;

use crate::modules::profiles::model::Profile;

/// JWT claims: identity only. Roles live in the registry and are queried
/// per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login result: the token, the profile, every role held, and the dashboard
/// the client should land on (highest-priority role wins).
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: Profile,
    pub roles: Vec<Role>,
    pub redirect_to: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
