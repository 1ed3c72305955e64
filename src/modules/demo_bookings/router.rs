use axum::{routing::post, Router};

use crate::modules::demo_bookings::controller::{book_demo, get_demo_bookings};
use crate::state::AppState;

pub fn init_demo_bookings_router() -> Router<AppState> {
    Router::new().route("/", post(book_demo).get(get_demo_bookings))
}
