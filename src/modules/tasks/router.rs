use axum::{
    routing::{get, post, put},
    Router,
};

use crate::modules::tasks::controller::{
    create_task, delete_task, get_student_tasks, get_submissions, get_tasks, grade_submission,
    submit_task, update_task,
};
use crate::state::AppState;

pub fn init_tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_task).get(get_tasks))
        .route("/student/{student_id}", get(get_student_tasks))
        .route("/{id}", put(update_task).delete(delete_task))
        .route("/{id}/submission", put(submit_task))
        .route("/{id}/submissions", get(get_submissions))
        .route("/{id}/submissions/{student_id}/grade", put(grade_submission))
}
