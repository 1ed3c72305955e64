use axum::{routing::get, Router};

use crate::modules::profiles::controller::{
    delete_profile, get_profile, get_profiles, get_teachers, update_profile,
};
use crate::state::AppState;

pub fn init_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profiles))
        .route("/teachers", get(get_teachers))
        .route(
            "/{id}",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
}
