use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::{EventId, UserId};

use crate::utils::errors::AppError;

use super::model::{
    CreateEventDto, Event, EventForStudent, EventRegistration, RegistrationWithStudent,
    UpdateEventDto,
};

pub struct EventService;

impl EventService {
    #[instrument(skip(db, dto))]
    pub async fn create_event(db: &PgPool, dto: CreateEventDto) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, event_date)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, event_date, created_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.event_date)
        .fetch_one(db)
        .await
        .context("Failed to create event")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_events(db: &PgPool) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, event_date, created_at
            FROM events
            ORDER BY event_date
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch events")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_event(db: &PgPool, id: EventId) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, event_date, created_at
            FROM events WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch event")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Event not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_event(
        db: &PgPool,
        id: EventId,
        dto: UpdateEventDto,
    ) -> Result<Event, AppError> {
        let existing = Self::get_event(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.or(existing.description);
        let event_date = dto.event_date.unwrap_or(existing.event_date);

        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $1, description = $2, event_date = $3
            WHERE id = $4
            RETURNING id, title, description, event_date, created_at
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(event_date)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update event")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_event(db: &PgPool, id: EventId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete event")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Event not found")));
        }

        Ok(())
    }

    /// Register a student. Idempotent: registering twice keeps the original
    /// row, which is returned either way.
    #[instrument(skip(db))]
    pub async fn register(
        db: &PgPool,
        event_id: EventId,
        student_id: UserId,
    ) -> Result<EventRegistration, AppError> {
        let inserted = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations (event_id, student_id)
            VALUES ($1, $2)
            ON CONFLICT (event_id, student_id) DO NOTHING
            RETURNING id, event_id, student_id, registered_at
            "#,
        )
        .bind(event_id)
        .bind(student_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::bad_request(anyhow::anyhow!("Unknown event or student"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        if let Some(registration) = inserted {
            return Ok(registration);
        }

        sqlx::query_as::<_, EventRegistration>(
            r#"
            SELECT id, event_id, student_id, registered_at
            FROM event_registrations
            WHERE event_id = $1 AND student_id = $2
            "#,
        )
        .bind(event_id)
        .bind(student_id)
        .fetch_one(db)
        .await
        .context("Failed to fetch existing registration")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_registrations(
        db: &PgPool,
        event_id: EventId,
    ) -> Result<Vec<RegistrationWithStudent>, AppError> {
        sqlx::query_as::<_, RegistrationWithStudent>(
            r#"
            SELECT r.id, r.student_id, p.full_name, r.registered_at
            FROM event_registrations r
            JOIN profiles p ON p.id = r.student_id
            WHERE r.event_id = $1
            ORDER BY r.registered_at
            "#,
        )
        .bind(event_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch registrations")
        .map_err(AppError::database)
    }

    /// Events with the student's own registration flag folded in.
    #[instrument(skip(db))]
    pub async fn get_events_for_student(
        db: &PgPool,
        student_id: UserId,
    ) -> Result<Vec<EventForStudent>, AppError> {
        sqlx::query_as::<_, EventForStudent>(
            r#"
            SELECT e.id, e.title, e.description, e.event_date,
                   (r.id IS NOT NULL) AS registered
            FROM events e
            LEFT JOIN event_registrations r
                   ON r.event_id = e.id AND r.student_id = $1
            ORDER BY e.event_date
            "#,
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch events for student")
        .map_err(AppError::database)
    }
}
