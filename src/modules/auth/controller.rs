use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::modules::profiles::model::{Profile, UpdateProfileDto};
use crate::modules::profiles::service::ProfileService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse, MessageResponse, RegisterRequestDto};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new (student) account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = Profile),
        (status = 400, description = "Email already exists or invalid body", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let profile = AuthService::register_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Sign out. Access tokens are stateless, so the server has nothing to
/// revoke; the client discards its token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument]
pub async fn logout_user(_auth_user: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Signed out".to_string(),
    })
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current profile", body = Profile),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let user_id = auth_user.user_id()?;
    let profile = ProfileService::get_profile(&state.db, user_id).await?;
    Ok(Json(profile))
}

/// Update the current user's own profile
#[utoipa::path(
    put,
    path = "/api/auth/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = Profile),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let user_id = auth_user.user_id()?;
    let profile = ProfileService::update_profile(&state.db, user_id, dto).await?;
    Ok(Json(profile))
}
