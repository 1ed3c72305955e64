use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::modules::notifications::controller::{
    get_notifications, mark_notification_read, send_notification,
};
use crate::state::AppState;

pub fn init_notifications_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_notifications))
        .route("/send", post(send_notification))
        .route("/{id}/read", patch(mark_notification_read))
}
