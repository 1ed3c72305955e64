use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{FeeId, UserId};
use gurukul_models::FeeStatus;

use crate::utils::errors::AppError;

use super::model::{CreateFeeDto, Fee, FeeTotals, FeeWithStudent, UpdateFeeDto};

pub struct FeeService;

impl FeeService {
    #[instrument(skip(db, dto))]
    pub async fn create_fee(db: &PgPool, dto: CreateFeeDto) -> Result<Fee, AppError> {
        sqlx::query_as::<_, Fee>(
            r#"
            INSERT INTO fees (student_id, amount, due_date)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, amount, due_date, paid_date, status, created_at
            "#,
        )
        .bind(dto.student_id)
        .bind(dto.amount)
        .bind(dto.due_date)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown student"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    #[instrument(skip(db))]
    pub async fn get_fees(
        db: &PgPool,
        status: Option<FeeStatus>,
    ) -> Result<Vec<FeeWithStudent>, AppError> {
        sqlx::query_as::<_, FeeWithStudent>(
            r#"
            SELECT f.id, f.student_id, p.full_name, f.amount, f.due_date, f.paid_date,
                   f.status, f.created_at
            FROM fees f
            JOIN profiles p ON p.id = f.student_id
            WHERE ($1::fee_status IS NULL OR f.status = $1)
            ORDER BY f.due_date DESC
            "#,
        )
        .bind(status)
        .fetch_all(db)
        .await
        .context("Failed to fetch fees")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_fees_for_student(
        db: &PgPool,
        student_id: UserId,
    ) -> Result<Vec<Fee>, AppError> {
        sqlx::query_as::<_, Fee>(
            r#"
            SELECT id, student_id, amount, due_date, paid_date, status, created_at
            FROM fees
            WHERE student_id = $1
            ORDER BY due_date DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch student fees")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_fee(db: &PgPool, id: FeeId) -> Result<Fee, AppError> {
        sqlx::query_as::<_, Fee>(
            r#"
            SELECT id, student_id, amount, due_date, paid_date, status, created_at
            FROM fees WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch fee")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Fee not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_fee(db: &PgPool, id: FeeId, dto: UpdateFeeDto) -> Result<Fee, AppError> {
        let existing = Self::get_fee(db, id).await?;

        let amount = dto.amount.unwrap_or(existing.amount);
        let due_date = dto.due_date.unwrap_or(existing.due_date);
        let paid_date = dto.paid_date.or(existing.paid_date);
        let status = dto.status.unwrap_or(existing.status);

        sqlx::query_as::<_, Fee>(
            r#"
            UPDATE fees
            SET amount = $1, due_date = $2, paid_date = $3, status = $4
            WHERE id = $5
            RETURNING id, student_id, amount, due_date, paid_date, status, created_at
            "#,
        )
        .bind(amount)
        .bind(due_date)
        .bind(paid_date)
        .bind(status)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update fee")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_fee(db: &PgPool, id: FeeId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fees WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete fee")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Fee not found")));
        }

        Ok(())
    }

    /// Sums partitioned by status. Empty table reports zeros.
    #[instrument(skip(db))]
    pub async fn totals(db: &PgPool, student_id: Option<UserId>) -> Result<FeeTotals, AppError> {
        let (pending, paid, overdue) = sqlx::query_as::<_, (f64, f64, f64)>(
            r#"
            SELECT COALESCE(SUM(amount) FILTER (WHERE status = 'pending'), 0),
                   COALESCE(SUM(amount) FILTER (WHERE status = 'paid'), 0),
                   COALESCE(SUM(amount) FILTER (WHERE status = 'overdue'), 0)
            FROM fees
            WHERE ($1::uuid IS NULL OR student_id = $1)
            "#,
        )
        .bind(student_id)
        .fetch_one(db)
        .await
        .context("Failed to compute fee totals")
        .map_err(AppError::database)?;

        Ok(FeeTotals {
            pending,
            paid,
            overdue,
            total: pending + paid + overdue,
        })
    }
}
