use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{BatchId, UserId};

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{EnrollStudentDto, StudentWithProfile, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "s.id, p.full_name, p.email, p.phone, s.board, s.grade, \
                               s.admission_date, s.batch_id, s.parent_id";

pub struct StudentService;

impl StudentService {
    /// Enroll a student: profile, registry role, and student record in one
    /// transaction. Re-enrolling an existing profile id upserts the student
    /// record instead of failing.
    #[instrument(skip(db, dto))]
    pub async fn enroll_student(
        db: &PgPool,
        dto: EnrollStudentDto,
    ) -> Result<StudentWithProfile, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let mut tx = db.begin().await.map_err(AppError::database)?;

        let profile_id = sqlx::query_scalar::<_, UserId>(
            r#"
            INSERT INTO profiles (full_name, email, phone, role, password)
            VALUES ($1, $2, $3, 'student', $4)
            RETURNING id
            "#,
        )
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&hashed_password)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "A profile with email {} already exists",
                        dto.email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, 'student') ON CONFLICT DO NOTHING",
        )
        .bind(profile_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::database)?;

        sqlx::query(
            r#"
            INSERT INTO students (id, board, grade, admission_date, batch_id, parent_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET board = EXCLUDED.board,
                grade = EXCLUDED.grade,
                admission_date = EXCLUDED.admission_date,
                batch_id = EXCLUDED.batch_id,
                parent_id = EXCLUDED.parent_id
            "#,
        )
        .bind(profile_id)
        .bind(dto.board)
        .bind(&dto.grade)
        .bind(dto.admission_date)
        .bind(dto.batch_id)
        .bind(dto.parent_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!(
                        "Unknown batch or parent profile"
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        tx.commit().await.map_err(AppError::database)?;

        Self::get_student(db, profile_id).await
    }

    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        batch_id: Option<BatchId>,
    ) -> Result<Vec<StudentWithProfile>, AppError> {
        let query = format!(
            r#"
            SELECT {STUDENT_COLUMNS}
            FROM students s
            JOIN profiles p ON p.id = s.id
            WHERE ($1::uuid IS NULL OR s.batch_id = $1)
            ORDER BY p.full_name
            "#
        );

        sqlx::query_as::<_, StudentWithProfile>(&query)
            .bind(batch_id)
            .fetch_all(db)
            .await
            .context("Failed to fetch students")
            .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: UserId) -> Result<StudentWithProfile, AppError> {
        let query = format!(
            r#"
            SELECT {STUDENT_COLUMNS}
            FROM students s
            JOIN profiles p ON p.id = s.id
            WHERE s.id = $1
            "#
        );

        sqlx::query_as::<_, StudentWithProfile>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: UserId,
        dto: UpdateStudentDto,
    ) -> Result<StudentWithProfile, AppError> {
        let existing = Self::get_student(db, id).await?;

        let board = dto.board.unwrap_or(existing.board);
        let grade = dto.grade.unwrap_or(existing.grade);
        let admission_date = dto.admission_date.or(existing.admission_date);
        let parent_id = dto.parent_id.or(existing.parent_id);

        sqlx::query(
            r#"
            UPDATE students
            SET board = $1, grade = $2, admission_date = $3, parent_id = $4
            WHERE id = $5
            "#,
        )
        .bind(board)
        .bind(&grade)
        .bind(admission_date)
        .bind(parent_id)
        .bind(id)
        .execute(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        Self::get_student(db, id).await
    }

    /// Move a student between batches (or out of any batch).
    #[instrument(skip(db))]
    pub async fn assign_batch(
        db: &PgPool,
        id: UserId,
        batch_id: Option<BatchId>,
    ) -> Result<StudentWithProfile, AppError> {
        let result = sqlx::query("UPDATE students SET batch_id = $1 WHERE id = $2")
            .bind(batch_id)
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::bad_request(anyhow::anyhow!("Unknown batch"));
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Self::get_student(db, id).await
    }

    /// Children linked to a parent profile.
    #[instrument(skip(db))]
    pub async fn get_children(
        db: &PgPool,
        parent_id: UserId,
    ) -> Result<Vec<StudentWithProfile>, AppError> {
        let query = format!(
            r#"
            SELECT {STUDENT_COLUMNS}
            FROM students s
            JOIN profiles p ON p.id = s.id
            WHERE s.parent_id = $1
            ORDER BY p.full_name
            "#
        );

        sqlx::query_as::<_, StudentWithProfile>(&query)
            .bind(parent_id)
            .fetch_all(db)
            .await
            .context("Failed to fetch children")
            .map_err(AppError::database)
    }

    /// Remove the academic record. The profile (account) stays.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: UserId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}
