use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_models::ids::EventId;
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreateEventDto, Event, EventForStudent, EventRegistration, RegistrationWithStudent,
    UpdateEventDto,
};
use super::service::EventService;

/// Create an event (admin)
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventDto,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, dto))]
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateEventDto>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let event = EventService::create_event(&state.db, dto).await?;
    state
        .changes
        .publish(EntityKind::Events, ChangeOp::Created, event.id.into());
    Ok((StatusCode::CREATED, Json(event)))
}

/// List events
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Events", body = [Event])
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn get_events(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = EventService::get_events(&state.db).await?;
    Ok(Json(events))
}

/// Events with the calling student's registration state
#[utoipa::path(
    get,
    path = "/api/events/mine",
    responses(
        (status = 200, description = "Events", body = [EventForStudent]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn get_my_events(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<EventForStudent>>, AppError> {
    let user_id = auth_user.user_id()?;
    ensure_any_role(&state.db, user_id, &[Role::Student]).await?;

    let events = EventService::get_events_for_student(&state.db, user_id).await?;
    Ok(Json(events))
}

/// Update an event (admin)
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = EventId, Path, description = "Event ID")),
    request_body = UpdateEventDto,
    responses(
        (status = 200, description = "Updated", body = Event),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state, dto))]
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EventId>,
    ValidatedJson(dto): ValidatedJson<UpdateEventDto>,
) -> Result<Json<Event>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let event = EventService::update_event(&state.db, id, dto).await?;
    state
        .changes
        .publish(EntityKind::Events, ChangeOp::Updated, id.into());
    Ok(Json(event))
}

/// Delete an event (admin)
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = EventId, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EventId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    EventService::delete_event(&state.db, id).await?;
    state
        .changes
        .publish(EntityKind::Events, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Event deleted successfully"})))
}

/// Register the calling student for an event (idempotent)
#[utoipa::path(
    post,
    path = "/api/events/{id}/register",
    params(("id" = EventId, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registration", body = EventRegistration),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn register_for_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EventId>,
) -> Result<Json<EventRegistration>, AppError> {
    let user_id = auth_user.user_id()?;
    ensure_any_role(&state.db, user_id, &[Role::Student]).await?;

    let registration = EventService::register(&state.db, id, user_id).await?;
    state.changes.publish(
        EntityKind::EventRegistrations,
        ChangeOp::Created,
        registration.id.into(),
    );
    Ok(Json(registration))
}

/// Registrations for an event (staff)
#[utoipa::path(
    get,
    path = "/api/events/{id}/registrations",
    params(("id" = EventId, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Registrations", body = [RegistrationWithStudent]),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Events"
)]
#[instrument(skip(state))]
pub async fn get_registrations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EventId>,
) -> Result<Json<Vec<RegistrationWithStudent>>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let registrations = EventService::get_registrations(&state.db, id).await?;
    Ok(Json(registrations))
}
