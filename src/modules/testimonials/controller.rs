use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::TestimonialId;
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateTestimonialDto, Testimonial, UpdateTestimonialDto};
use super::service::TestimonialService;

/// Featured testimonials for the public site (no auth)
#[utoipa::path(
    get,
    path = "/api/testimonials/featured",
    responses(
        (status = 200, description = "Featured testimonials", body = [Testimonial])
    ),
    tag = "Testimonials"
)]
#[instrument(skip(state))]
pub async fn get_featured(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = TestimonialService::get_featured(&state.db).await?;
    Ok(Json(testimonials))
}

/// All testimonials (admin)
#[utoipa::path(
    get,
    path = "/api/testimonials",
    responses(
        (status = 200, description = "Testimonials", body = [Testimonial]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Testimonials"
)]
#[instrument(skip(state))]
pub async fn get_testimonials(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let testimonials = TestimonialService::get_all(&state.db).await?;
    Ok(Json(testimonials))
}

/// Create a testimonial (admin)
#[utoipa::path(
    post,
    path = "/api/testimonials",
    request_body = CreateTestimonialDto,
    responses(
        (status = 201, description = "Created", body = Testimonial),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Testimonials"
)]
#[instrument(skip(state, dto))]
pub async fn create_testimonial(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTestimonialDto>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let testimonial = TestimonialService::create(&state.db, dto).await?;
    state.changes.publish(
        EntityKind::Testimonials,
        ChangeOp::Created,
        testimonial.id.into(),
    );
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// Update a testimonial (admin)
#[utoipa::path(
    put,
    path = "/api/testimonials/{id}",
    params(("id" = TestimonialId, Path, description = "Testimonial ID")),
    request_body = UpdateTestimonialDto,
    responses(
        (status = 200, description = "Updated", body = Testimonial),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Testimonials"
)]
#[instrument(skip(state, dto))]
pub async fn update_testimonial(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TestimonialId>,
    ValidatedJson(dto): ValidatedJson<UpdateTestimonialDto>,
) -> Result<Json<Testimonial>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let testimonial = TestimonialService::update(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Testimonials, ChangeOp::Updated, id.into());
    Ok(Json(testimonial))
}

/// Delete a testimonial (admin)
#[utoipa::path(
    delete,
    path = "/api/testimonials/{id}",
    params(("id" = TestimonialId, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Testimonials"
)]
#[instrument(skip(state))]
pub async fn delete_testimonial(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<TestimonialId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    TestimonialService::delete(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Testimonials, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Testimonial deleted successfully"})))
}
