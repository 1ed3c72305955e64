use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_core::metrics::{attendance_percentage, SummaryWindow};
use gurukul_models::ids::{ClassId, UserId};

use crate::utils::errors::AppError;

use super::model::{
    AttendanceEntryDto, AttendanceRecord, AttendanceSummary, AttendanceWithStudent,
};

pub struct AttendanceService;

impl AttendanceService {
    /// Replace the stored roster for a class with the submitted one.
    ///
    /// Delete and insert run in one transaction, so the stored set always
    /// equals either the previous roster or the submitted roster — a failed
    /// save never leaves the class with zero rows.
    #[instrument(skip(db, entries))]
    pub async fn save_roster(
        db: &PgPool,
        class_id: ClassId,
        entries: &[AttendanceEntryDto],
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let class_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM classes WHERE id = $1)")
                .bind(class_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if !class_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }

        let student_ids: Vec<UserId> = entries.iter().map(|e| e.student_id).collect();
        let presences: Vec<bool> = entries.iter().map(|e| e.is_present).collect();

        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query("DELETE FROM attendance WHERE class_id = $1")
            .bind(class_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        let records = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance (class_id, student_id, is_present)
            SELECT $1, t.student_id, t.is_present
            FROM UNNEST($2::uuid[], $3::boolean[]) AS t(student_id, is_present)
            RETURNING id, class_id, student_id, is_present, marked_at
            "#,
        )
        .bind(class_id)
        .bind(&student_ids)
        .bind(&presences)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Roster references an unknown student"
                    ));
                }
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Roster lists a student more than once"
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(records)
    }

    #[instrument(skip(db))]
    pub async fn get_roster(
        db: &PgPool,
        class_id: ClassId,
    ) -> Result<Vec<AttendanceWithStudent>, AppError> {
        sqlx::query_as::<_, AttendanceWithStudent>(
            r#"
            SELECT a.id, a.student_id, p.full_name, a.is_present, a.marked_at
            FROM attendance a
            JOIN profiles p ON p.id = a.student_id
            WHERE a.class_id = $1
            ORDER BY p.full_name
            "#,
        )
        .bind(class_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch attendance roster")
        .map_err(AppError::database)
    }

    /// Present/total over the student's records, optionally restricted to
    /// the calendar window containing now. Zero records reports 0%.
    #[instrument(skip(db))]
    pub async fn student_summary(
        db: &PgPool,
        student_id: UserId,
        window: Option<SummaryWindow>,
    ) -> Result<AttendanceSummary, AppError> {
        let since = window.map(|w| w.start(Utc::now()));

        let (total, present) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE is_present)
            FROM attendance
            WHERE student_id = $1
              AND ($2::timestamptz IS NULL OR marked_at >= $2)
            "#,
        )
        .bind(student_id)
        .bind(since)
        .fetch_one(db)
        .await
        .context("Failed to compute attendance summary")
        .map_err(AppError::database)?;

        Ok(AttendanceSummary {
            student_id,
            window,
            total,
            present,
            percentage: attendance_percentage(present as u64, total as u64),
        })
    }
}
