use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{BatchId, TaskId, UserId};

use crate::utils::errors::AppError;

use super::model::{
    CreateTaskDto, SubmissionWithStudent, Task, TaskSubmission, TaskWithSubmission, UpdateTaskDto,
};

pub struct TaskService;

impl TaskService {
    #[instrument(skip(db, dto))]
    pub async fn create_task(
        db: &PgPool,
        dto: CreateTaskDto,
        created_by: UserId,
    ) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (batch_id, title, description, due_date, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, batch_id, title, description, due_date, created_by, created_at
            "#,
        )
        .bind(dto.batch_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.due_date)
        .bind(created_by)
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
    pub async fn get_tasks(db: &PgPool, batch_id: Option<BatchId>) -> Result<Vec<Task>, AppError> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, batch_id, title, description, due_date, created_by, created_at
            FROM tasks
            WHERE ($1::uuid IS NULL OR batch_id = $1)
            ORDER BY due_date
            "#,
        )
        .bind(batch_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch tasks")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_task(db: &PgPool, id: TaskId) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, batch_id, title, description, due_date, created_by, created_at
            FROM tasks WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch task")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Task not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_task(db: &PgPool, id: TaskId, dto: UpdateTaskDto) -> Result<Task, AppError> {
        let existing = Self::get_task(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.or(existing.description);
        let due_date = dto.due_date.unwrap_or(existing.due_date);

        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, due_date = $3
            WHERE id = $4
            RETURNING id, batch_id, title, description, due_date, created_by, created_at
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(due_date)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update task")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_task(db: &PgPool, id: TaskId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete task")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Task not found")));
        }

        Ok(())
    }

    /// Toggle a student's completion state. Upsert on (task, student): atomic
    /// and idempotent, so repeated calls leave exactly one row holding the
    /// latest value.
    #[instrument(skip(db))]
    pub async fn upsert_submission(
        db: &PgPool,
        task_id: TaskId,
        student_id: UserId,
        is_completed: bool,
    ) -> Result<TaskSubmission, AppError> {
        sqlx::query_as::<_, TaskSubmission>(
            r#"
            INSERT INTO task_submissions (task_id, student_id, is_completed, submitted_at)
            VALUES ($1, $2, $3, CASE WHEN $3 THEN now() END)
            ON CONFLICT (task_id, student_id) DO UPDATE
            SET is_completed = EXCLUDED.is_completed,
                submitted_at = CASE WHEN EXCLUDED.is_completed THEN now() END
            RETURNING id, task_id, student_id, is_completed, submitted_at, grade
            "#,
        )
        .bind(task_id)
        .bind(student_id)
        .bind(is_completed)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown task or student"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    /// Record a grade, keeping whatever completion state exists.
    #[instrument(skip(db))]
    pub async fn grade_submission(
        db: &PgPool,
        task_id: TaskId,
        student_id: UserId,
        grade: i32,
    ) -> Result<TaskSubmission, AppError> {
        sqlx::query_as::<_, TaskSubmission>(
            r#"
            INSERT INTO task_submissions (task_id, student_id, grade)
            VALUES ($1, $2, $3)
            ON CONFLICT (task_id, student_id) DO UPDATE
            SET grade = EXCLUDED.grade
            RETURNING id, task_id, student_id, is_completed, submitted_at, grade
            "#,
        )
        .bind(task_id)
        .bind(student_id)
        .bind(grade)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown task or student"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })
    }

    #[instrument(skip(db))]
    pub async fn get_submissions_for_task(
        db: &PgPool,
        task_id: TaskId,
    ) -> Result<Vec<SubmissionWithStudent>, AppError> {
        sqlx::query_as::<_, SubmissionWithStudent>(
            r#"
            SELECT s.id, s.student_id, p.full_name, s.is_completed, s.submitted_at, s.grade
            FROM task_submissions s
            JOIN profiles p ON p.id = s.student_id
            WHERE s.task_id = $1
            ORDER BY p.full_name
            "#,
        )
        .bind(task_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch submissions")
        .map_err(AppError::database)
    }

    /// Tasks for the student's batch, with their own submission state.
    #[instrument(skip(db))]
    pub async fn get_tasks_for_student(
        db: &PgPool,
        student_id: UserId,
    ) -> Result<Vec<TaskWithSubmission>, AppError> {
        sqlx::query_as::<_, TaskWithSubmission>(
            r#"
            SELECT t.id, t.batch_id, t.title, t.description, t.due_date, t.created_at,
                   s.is_completed, s.submitted_at, s.grade
            FROM tasks t
            JOIN students st ON st.batch_id = t.batch_id AND st.id = $1
            LEFT JOIN task_submissions s ON s.task_id = t.id AND s.student_id = $1
            ORDER BY t.due_date
            "#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch student tasks")
        .map_err(AppError::database)
    }
}
