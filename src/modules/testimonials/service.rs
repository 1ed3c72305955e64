use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::TestimonialId;

use crate::utils::errors::AppError;

use super::model::{CreateTestimonialDto, Testimonial, UpdateTestimonialDto};

pub struct TestimonialService;

impl TestimonialService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateTestimonialDto) -> Result<Testimonial, AppError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (student_name, content, rating, is_featured)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_name, content, rating, is_featured, created_at
            "#,
        )
        .bind(&dto.student_name)
        .bind(&dto.content)
        .bind(dto.rating)
        .bind(dto.is_featured)
        .fetch_one(db)
        .await
        .context("Failed to create testimonial")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool) -> Result<Vec<Testimonial>, AppError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, student_name, content, rating, is_featured, created_at
            FROM testimonials
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch testimonials")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_featured(db: &PgPool) -> Result<Vec<Testimonial>, AppError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, student_name, content, rating, is_featured, created_at
            FROM testimonials
            WHERE is_featured
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch featured testimonials")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: TestimonialId) -> Result<Testimonial, AppError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT id, student_name, content, rating, is_featured, created_at
            FROM testimonials WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch testimonial")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Testimonial not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: TestimonialId,
        dto: UpdateTestimonialDto,
    ) -> Result<Testimonial, AppError> {
        let existing = Self::get(db, id).await?;

        let student_name = dto.student_name.unwrap_or(existing.student_name);
        let content = dto.content.unwrap_or(existing.content);
        let rating = dto.rating.unwrap_or(existing.rating);
        let is_featured = dto.is_featured.unwrap_or(existing.is_featured);

        sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET student_name = $1, content = $2, rating = $3, is_featured = $4
            WHERE id = $5
            RETURNING id, student_name, content, rating, is_featured, created_at
            "#,
        )
        .bind(&student_name)
        .bind(&content)
        .bind(rating)
        .bind(is_featured)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update testimonial")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: TestimonialId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete testimonial")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Testimonial not found"
            )));
        }

        Ok(())
    }
}
