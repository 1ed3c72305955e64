use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::UserId;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{PaginatedProfilesResponse, Profile, ProfileFilterParams, UpdateProfileDto};
use super::service::ProfileService;

/// List profiles (admin), optionally filtered by registry role
#[utoipa::path(
    get,
    path = "/api/profiles",
    responses(
        (status = 200, description = "Profiles", body = PaginatedProfilesResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_profiles(
    State(state): State<AppState>,
    Query(params): Query<ProfileFilterParams>,
) -> Result<Json<PaginatedProfilesResponse>, AppError> {
    let (profiles, total) = ProfileService::get_profiles(&state.db, &params).await?;
    let meta = params.pagination.meta(total, profiles.len());
    Ok(Json(PaginatedProfilesResponse {
        data: profiles,
        meta,
    }))
}

/// Profiles holding the teacher role
#[utoipa::path(
    get,
    path = "/api/profiles/teachers",
    responses(
        (status = 200, description = "Teacher profiles", body = [Profile])
    ),
    security(("bearer_auth" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_teachers(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, AppError> {
    let teachers = ProfileService::get_teachers(&state.db).await?;
    Ok(Json(teachers))
}

/// Fetch one profile
#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(("id" = UserId, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::get_profile(&state.db, id).await?;
    Ok(Json(profile))
}

/// Update a profile
#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    params(("id" = UserId, Path, description = "Profile ID")),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated", body = Profile),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state, dto))]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfileService::update_profile(&state.db, id, dto).await?;
    Ok(Json(profile))
}

/// Delete a profile (and, via cascade, its student record and roles)
#[utoipa::path(
    delete,
    path = "/api/profiles/{id}",
    params(("id" = UserId, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ProfileService::delete_profile(&state.db, id).await?;
    Ok(Json(json!({"message": "Profile deleted successfully"})))
}
