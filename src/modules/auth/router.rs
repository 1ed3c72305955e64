use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::auth::controller::{get_me, login_user, logout_user, register_user, update_me};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/logout", post(logout_user))
        .route("/me", get(get_me).put(update_me))
}
