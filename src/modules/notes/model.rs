use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use gurukul_models::ids::{BatchId, ClassId, NoteId, UserId};

/// An uploaded class note. `file_url` is the storage key; the public URL is
/// derived from it when the note is served.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClassNote {
    pub id: NoteId,
    pub class_id: ClassId,
    pub title: String,
    pub file_url: String,
    pub uploaded_by: Option<UserId>,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

/// Note plus its resolved public URL.
#[derive(Debug, Serialize, ToSchema)]
pub struct NoteResponse {
    #[serde(flatten)]
    pub note: ClassNote,
    pub download_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NoteFilterParams {
    pub class_id: Option<ClassId>,
    pub batch_id: Option<BatchId>,
}
