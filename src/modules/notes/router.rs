use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::config::storage::StorageConfig;
use crate::modules::notes::controller::{delete_note, get_notes, upload_note};
use crate::state::AppState;

pub fn init_notes_router(storage_config: &StorageConfig) -> Router<AppState> {
    Router::new()
        .route("/", get(get_notes))
        .route("/class/{class_id}", post(upload_note))
        .route("/{id}", delete(delete_note))
        // Multipart bodies carry the PDF plus form overhead.
        .layer(DefaultBodyLimit::max(storage_config.max_upload_bytes + 64 * 1024))
}
