use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::instrument;

use gurukul_core::file_storage::{validate_content_type, FileStorage};
use gurukul_models::ids::{BatchId, ClassId, NoteId};
use gurukul_models::Role;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::ensure_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::realtime::{ChangeOp, EntityKind};
use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{NoteFilterParams, NoteResponse};
use super::service::NoteService;

/// Upload a PDF note for a class (staff).
///
/// Multipart form: a `title` text field and a `file` part carrying the PDF.
#[utoipa::path(
    post,
    path = "/api/notes/class/{class_id}",
    params(("class_id" = ClassId, Path, description = "Class ID")),
    responses(
        (status = 201, description = "Note uploaded", body = NoteResponse),
        (status = 400, description = "Missing parts or unsupported file", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notes"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<ClassId>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<NoteResponse>), AppError> {
    let user_id = auth_user.user_id()?;
    ensure_any_role(&state.db, user_id, &[Role::Admin, Role::Teacher]).await?;

    let mut title: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("title") => {
                let text = field.text().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Invalid title field: {}", e))
                })?;
                title = Some(text);
            }
            Some("file") => {
                let content_type = field.content_type().unwrap_or("").to_string();
                validate_content_type(&content_type)
                    .map_err(|e| AppError::bad_request(anyhow::anyhow!("{}", e)))?;

                let bytes = field.bytes().await.map_err(|e| {
                    AppError::bad_request(anyhow::anyhow!("Failed to read file: {}", e))
                })?;
                file_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("title is required")))?;
    let file_bytes =
        file_bytes.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("file is required")))?;

    let key = format!("notes/{}.pdf", NoteId::new());
    let stored_key = state
        .storage
        .save(&key, &file_bytes)
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("{}", e)))?;

    let note = NoteService::create_note(&state.db, class_id, &title, &stored_key, user_id).await?;
    let download_url = state
        .storage
        .public_url(&note.file_url)
        .map_err(|e| AppError::internal(anyhow::anyhow!("{}", e)))?;

    state
        .changes
        .publish(EntityKind::ClassNotes, ChangeOp::Created, note.id.into());

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse { note, download_url }),
    ))
}

/// List notes by class or batch
#[utoipa::path(
    get,
    path = "/api/notes",
    params(
        ("class_id" = Option<ClassId>, Query, description = "Filter by class"),
        ("batch_id" = Option<BatchId>, Query, description = "Filter by batch")
    ),
    responses(
        (status = 200, description = "Notes", body = [NoteResponse])
    ),
    security(("bearer_auth" = [])),
    tag = "Notes"
)]
#[instrument(skip(state))]
pub async fn get_notes(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<NoteFilterParams>,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let notes = NoteService::get_notes(&state.db, params.class_id, params.batch_id).await?;

    let mut responses = Vec::with_capacity(notes.len());
    for note in notes {
        let download_url = state
            .storage
            .public_url(&note.file_url)
            .map_err(|e| AppError::internal(anyhow::anyhow!("{}", e)))?;
        responses.push(NoteResponse { note, download_url });
    }

    Ok(Json(responses))
}

/// Delete a note and its stored file (staff)
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(("id" = NoteId, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Notes"
)]
#[instrument(skip(state))]
pub async fn delete_note(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<NoteId>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_any_role(
        &state.db,
        auth_user.user_id()?,
        &[Role::Admin, Role::Teacher],
    )
    .await?;

    let note = NoteService::delete_note(&state.db, id).await?;

    // Best effort: a missing file on disk should not fail the delete.
    if let Err(e) = state.storage.delete(&note.file_url).await {
        tracing::warn!(note_id = %id, error = %e, "Failed to remove stored note file");
    }

    state
        .changes
        .publish(EntityKind::ClassNotes, ChangeOp::Deleted, id.into());
    Ok(Json(json!({"message": "Note deleted successfully"})))
}
