use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::BatchId;

use crate::utils::errors::AppError;

use super::model::{Batch, BatchWithCount, CreateBatchDto, UpdateBatchDto};

pub struct BatchService;

impl BatchService {
    #[instrument(skip(db, dto))]
    pub async fn create_batch(db: &PgPool, dto: CreateBatchDto) -> Result<Batch, AppError> {
        sqlx::query_as::<_, Batch>(
            r#"
            INSERT INTO batches (name, board, grade, mode, teacher_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, board, grade, mode, teacher_id, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(dto.board)
        .bind(&dto.grade)
        .bind(dto.mode)
        .bind(dto.teacher_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown teacher profile"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    #[instrument(skip(db))]
    pub async fn get_batches(db: &PgPool) -> Result<Vec<BatchWithCount>, AppError> {
        sqlx::query_as::<_, BatchWithCount>(
            r#"
            SELECT b.id, b.name, b.board, b.grade, b.mode, b.teacher_id,
                   p.full_name AS teacher_name,
                   (SELECT COUNT(*) FROM students s WHERE s.batch_id = b.id) AS student_count,
                   b.created_at
            FROM batches b
            LEFT JOIN profiles p ON p.id = b.teacher_id
            ORDER BY b.name
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch batches")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_batch(db: &PgPool, id: BatchId) -> Result<Batch, AppError> {
        sqlx::query_as::<_, Batch>(
            r#"
            SELECT id, name, board, grade, mode, teacher_id, created_at
            FROM batches WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch batch")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Batch not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_batch(
        db: &PgPool,
        id: BatchId,
        dto: UpdateBatchDto,
    ) -> Result<Batch, AppError> {
        let existing = Self::get_batch(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let board = dto.board.unwrap_or(existing.board);
        let grade = dto.grade.unwrap_or(existing.grade);
        let mode = dto.mode.unwrap_or(existing.mode);
        let teacher_id = dto.teacher_id.or(existing.teacher_id);

        sqlx::query_as::<_, Batch>(
            r#"
            UPDATE batches
            SET name = $1, board = $2, grade = $3, mode = $4, teacher_id = $5
            WHERE id = $6
            RETURNING id, name, board, grade, mode, teacher_id, created_at
            "#,
        )
        .bind(&name)
        .bind(board)
        .bind(&grade)
        .bind(mode)
        .bind(teacher_id)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update batch")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_batch(db: &PgPool, id: BatchId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM batches WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete batch")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Batch not found")));
        }

        Ok(())
    }
}
