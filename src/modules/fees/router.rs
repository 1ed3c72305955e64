use axum::{
    routing::{get, post},
    Router,
};

use crate::modules::fees::controller::{
    create_fee, delete_fee, get_fees, get_student_fees, get_totals, update_fee,
};
use crate::state::AppState;

pub fn init_fees_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fee).get(get_fees))
        .route("/totals", get(get_totals))
        .route("/student/{student_id}", get(get_student_fees))
        .route("/{id}", axum::routing::put(update_fee).delete(delete_fee))
}
