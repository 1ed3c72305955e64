use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::events::controller::{
    create_event, delete_event, get_events, get_my_events, get_registrations, register_for_event,
    update_event,
};
use crate::state::AppState;

pub fn init_events_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event).get(get_events))
        .route("/mine", get(get_my_events))
        .route("/{id}", axum::routing::put(update_event).delete(delete_event))
        .route("/{id}/register", post(register_for_event))
        .route("/{id}/registrations", get(get_registrations))
}
