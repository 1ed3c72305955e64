use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;

use super::model::{BookDemoDto, DemoBooking};

pub struct DemoBookingService;

impl DemoBookingService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: BookDemoDto) -> Result<DemoBooking, AppError> {
        sqlx::query_as::<_, DemoBooking>(
            r#"
            INSERT INTO demo_bookings (full_name, email, phone, board, preferred_mode)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, email, phone, board, preferred_mode, created_at
            "#,
        )
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(dto.board)
        .bind(dto.preferred_mode)
        .fetch_one(db)
        .await
        .context("Failed to create demo booking")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool) -> Result<Vec<DemoBooking>, AppError> {
        sqlx::query_as::<_, DemoBooking>(
            r#"
            SELECT id, full_name, email, phone, board, preferred_mode, created_at
            FROM demo_bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch demo bookings")
        .map_err(AppError::database)
    }
}
