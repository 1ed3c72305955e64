use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{BatchId, ClassId, NoteId, UserId};

use crate::utils::errors::AppError;

use super::model::ClassNote;

pub struct NoteService;

impl NoteService {
    #[instrument(skip(db))]
    pub async fn create_note(
        db: &PgPool,
        class_id: ClassId,
        title: &str,
        file_url: &str,
        uploaded_by: UserId,
    ) -> Result<ClassNote, AppError> {
        sqlx::query_as::<_, ClassNote>(
            r#"
            INSERT INTO class_notes (class_id, title, file_url, uploaded_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, class_id, title, file_url, uploaded_by, uploaded_at
            "#,
        )
        .bind(class_id)
        .bind(title)
        .bind(file_url)
        .bind(uploaded_by)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown class"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    /// Notes filtered by class or by every class in a batch.
    #[instrument(skip(db))]
    pub async fn get_notes(
        db: &PgPool,
        class_id: Option<ClassId>,
        batch_id: Option<BatchId>,
    ) -> Result<Vec<ClassNote>, AppError> {
        sqlx::query_as::<_, ClassNote>(
            r#"
            SELECT n.id, n.class_id, n.title, n.file_url, n.uploaded_by, n.uploaded_at
            FROM class_notes n
            JOIN classes c ON c.id = n.class_id
            WHERE ($1::uuid IS NULL OR n.class_id = $1)
              AND ($2::uuid IS NULL OR c.batch_id = $2)
            ORDER BY n.uploaded_at DESC
            "#,
        )
        .bind(class_id)
        .bind(batch_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch notes")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_note(db: &PgPool, id: NoteId) -> Result<ClassNote, AppError> {
        sqlx::query_as::<_, ClassNote>(
            r#"
            SELECT id, class_id, title, file_url, uploaded_by, uploaded_at
            FROM class_notes WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch note")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Note not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_note(db: &PgPool, id: NoteId) -> Result<ClassNote, AppError> {
        let note = Self::get_note(db, id).await?;

        sqlx::query("DELETE FROM class_notes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete note")
            .map_err(AppError::database)?;

        Ok(note)
    }
}
