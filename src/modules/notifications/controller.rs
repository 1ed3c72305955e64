use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use gurukul_models::ids::NotificationId;
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Notification, SendNotificationDto, SendNotificationResponse};
use super::service::NotificationService;

/// Fan a notification out to all students, a batch, or one student (admin)
#[utoipa::path(
    post,
    path = "/api/notifications/send",
    request_body = SendNotificationDto,
    responses(
        (status = 200, description = "Rows created", body = SendNotificationResponse),
        (status = 400, description = "Missing target id", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state, dto))]
pub async fn send_notification(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<SendNotificationDto>,
) -> Result<Json<SendNotificationResponse>, AppError> {
    ensure_any_role(&state.db, auth_user.user_id()?, &[Role::Admin]).await?;

    let recipients = NotificationService::send(&state.db, &dto).await?;
    state
        .changes
        .publish(EntityKind::Notifications, ChangeOp::Created, Uuid::new_v4());
    Ok(Json(SendNotificationResponse { recipients }))
}

/// The calling user's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications", body = [Notification])
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn get_notifications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Notification>>, AppError> {
    let user_id = auth_user.user_id()?;
    let notifications = NotificationService::get_for_recipient(&state.db, user_id).await?;
    Ok(Json(notifications))
}

/// Mark one of the calling user's notifications read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(("id" = NotificationId, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Updated", body = Notification),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
#[instrument(skip(state))]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<Notification>, AppError> {
    let user_id = auth_user.user_id()?;
    let notification = NotificationService::mark_read(&state.db, id, user_id).await?;
    state
        .changes
        .publish(EntityKind::Notifications, ChangeOp::Updated, id.into());
    Ok(Json(notification))
}
