use axum::{routing::get, Router};

use crate::modules::attendance::controller::{get_roster, save_roster, student_summary};
use crate::state::AppState;

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/class/{class_id}", get(get_roster).put(save_roster))
        .route("/student/{student_id}/summary", get(student_summary))
}
