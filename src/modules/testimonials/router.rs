use axum::{
    routing::{get, post, put},
    Router,
};

use crate::modules::testimonials::controller::{
    create_testimonial, delete_testimonial, get_featured, get_testimonials, update_testimonial,
};
use crate::state::AppState;

pub fn init_testimonials_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_testimonial).get(get_testimonials))
        .route("/featured", get(get_featured))
        .route("/{id}", put(update_testimonial).delete(delete_testimonial))
}
