use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{NotificationId, UserId};

use crate::utils::errors::AppError;

use super::model::{Notification, NotificationTarget, SendNotificationDto};

pub struct NotificationService;

impl NotificationService {
    /// Resolve the recipient list, then insert one row per recipient in a
    /// single statement — all-or-nothing at the statement level. There is no
    /// idempotency key: retrying a send that partially failed on the backend
    /// can duplicate notifications, which matches the documented semantics.
    #[instrument(skip(db, dto))]
    pub async fn send(db: &PgPool, dto: &SendNotificationDto) -> Result<u64, AppError> {
        let recipients: Vec<UserId> = match dto.target {
            NotificationTarget::All => {
                sqlx::query_scalar::<_, UserId>("SELECT id FROM students")
                    .fetch_all(db)
                    .await
                    .context("Failed to resolve recipients")
                    .map_err(AppError::database)?
            }
            NotificationTarget::Batch => {
                let batch_id = dto.batch_id.ok_or_else(|| {
                    AppError::bad_request(anyhow::anyhow!(
                        "batch_id is required for a batch notification"
                    ))
                })?;
                sqlx::query_scalar::<_, UserId>("SELECT id FROM students WHERE batch_id = $1")
                    .bind(batch_id)
                    .fetch_all(db)
                    .await
                    .context("Failed to resolve batch recipients")
                    .map_err(AppError::database)?
            }
            NotificationTarget::Individual => {
                let student_id = dto.student_id.ok_or_else(|| {
                    AppError::bad_request(anyhow::anyhow!(
                        "student_id is required for an individual notification"
                    ))
                })?;
                vec![student_id]
            }
        };

        if recipients.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO notifications (recipient_id, title, message)
            SELECT t.recipient_id, $2, $3
            FROM UNNEST($1::uuid[]) AS t(recipient_id)
            "#,
        )
        .bind(&recipients)
        .bind(&dto.title)
        .bind(&dto.message)
        .execute(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown recipient"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(db))]
    pub async fn get_for_recipient(
        db: &PgPool,
        recipient_id: UserId,
    ) -> Result<Vec<Notification>, AppError> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, recipient_id, title, message, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch notifications")
        .map_err(AppError::database)
    }

    /// Mark one of the recipient's own notifications read.
    #[instrument(skip(db))]
    pub async fn mark_read(
        db: &PgPool,
        id: NotificationId,
        recipient_id: UserId,
    ) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND recipient_id = $2
            RETURNING id, recipient_id, title, message, is_read, created_at
            "#,
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(db)
        .await
        .context("Failed to mark notification read")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notification not found")))
    }
}
