use axum::{extract::State, http::StatusCode, Json};
use tracing::instrument;

use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{BookDemoDto, DemoBooking};
use super::service::DemoBookingService;

/// Book a demo class from the public site (no auth)
#[utoipa::path(
    post,
    path = "/api/demo-bookings",
    request_body = BookDemoDto,
    responses(
        (status = 201, description = "Booked", body = DemoBooking),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "DemoBookings"
)]
#[instrument(skip(state, dto))]
pub async fn book_demo(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<BookDemoDto>,
) -> Result<(StatusCode, Json<DemoBooking>), AppError> {
    let booking = DemoBookingService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List demo bookings (admin)
#[utoipa::path(
    get,
    path = "/api/demo-bookings",
    responses(
        (status = 200, description = "Bookings", body = [DemoBooking]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "DemoBookings"
)]
#[instrument(skip(state))]
pub async fn get_demo_bookings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<DemoBooking>>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let bookings = DemoBookingService::get_all(&state.db).await?;
    Ok(Json(bookings))
}
