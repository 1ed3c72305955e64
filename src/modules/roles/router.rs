use axum::{
    routing::{delete, get},
    Router,
};

use crate::modules::roles::controller::{assign_role, get_user_roles, revoke_role};
use crate::state::AppState;

pub fn init_roles_router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(get_user_roles).post(assign_role))
        .route("/{user_id}/{role}", delete(revoke_role))
}
