use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use gurukul_models::ids::UserId;

use crate::modules::auth::model::Claims;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Extractor that validates the bearer JWT and exposes the caller's claims.
///
/// Claims carry identity only (user id + email). Roles are deliberately not
/// embedded in the token: the role registry is authoritative and is queried
/// per check, so revocations take effect immediately.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
