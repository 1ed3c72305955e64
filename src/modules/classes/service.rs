use anyhow::Context;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{BatchId, ClassId};

use crate::utils::errors::AppError;

use super::model::{ClassSession, CreateClassDto, UpdateClassDto};

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<ClassSession, AppError> {
        sqlx::query_as::<_, ClassSession>(
            r#"
            INSERT INTO classes (batch_id, subject, date, time, duration_minutes, meet_link)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, batch_id, subject, date, time, duration_minutes, meet_link,
                      is_completed, created_at
            "#,
        )
        .bind(dto.batch_id)
        .bind(&dto.subject)
        .bind(dto.date)
        .bind(dto.time)
        .bind(dto.duration_minutes)
        .bind(&dto.meet_link)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown batch"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    #[instrument(skip(db))]
    pub async fn get_classes(
        db: &PgPool,
        batch_id: Option<BatchId>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ClassSession>, AppError> {
        sqlx::query_as::<_, ClassSession>(
            r#"
            SELECT id, batch_id, subject, date, time, duration_minutes, meet_link,
                   is_completed, created_at
            FROM classes
            WHERE ($1::uuid IS NULL OR batch_id = $1)
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date, time
            "#,
        )
        .bind(batch_id)
        .bind(from)
        .bind(to)
        .fetch_all(db)
        .await
        .context("Failed to fetch classes")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: ClassId) -> Result<ClassSession, AppError> {
        sqlx::query_as::<_, ClassSession>(
            r#"
            SELECT id, batch_id, subject, date, time, duration_minutes, meet_link,
                   is_completed, created_at
            FROM classes WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch class")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(
        db: &PgPool,
        id: ClassId,
        dto: UpdateClassDto,
    ) -> Result<ClassSession, AppError> {
        let existing = Self::get_class(db, id).await?;

        let subject = dto.subject.unwrap_or(existing.subject);
        let date = dto.date.unwrap_or(existing.date);
        let time = dto.time.unwrap_or(existing.time);
        let duration_minutes = dto.duration_minutes.or(existing.duration_minutes);
        let meet_link = dto.meet_link.or(existing.meet_link);

        sqlx::query_as::<_, ClassSession>(
            r#"
            UPDATE classes
            SET subject = $1, date = $2, time = $3, duration_minutes = $4, meet_link = $5
            WHERE id = $6
            RETURNING id, batch_id, subject, date, time, duration_minutes, meet_link,
                      is_completed, created_at
            "#,
        )
        .bind(&subject)
        .bind(date)
        .bind(time)
        .bind(duration_minutes)
        .bind(&meet_link)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update class")
        .map_err(AppError::database)
    }

    /// Teachers flag a session as held; attendance usually follows.
    #[instrument(skip(db))]
    pub async fn set_completed(
        db: &PgPool,
        id: ClassId,
        is_completed: bool,
    ) -> Result<ClassSession, AppError> {
        sqlx::query_as::<_, ClassSession>(
            r#"
            UPDATE classes SET is_completed = $1 WHERE id = $2
            RETURNING id, batch_id, subject, date, time, duration_minutes, meet_link,
                      is_completed, created_at
            "#,
        )
        .bind(is_completed)
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to update class completion")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: ClassId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete class")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        Ok(())
    }
}
