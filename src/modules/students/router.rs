use axum::{
    routing::{get, post, put},
    Router,
};

use crate::modules::students::controller::{
    assign_batch, delete_student, enroll_student, get_children, get_student, get_students,
    update_student,
};
use crate::state::AppState;

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll_student).get(get_students))
        .route("/children", get(get_children))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/{id}/batch", put(assign_batch))
}
