use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::UserId;
use gurukul_models::Role;

use crate::utils::errors::AppError;

use super::model::{Profile, ProfileFilterParams, UpdateProfileDto};

pub struct ProfileService;

impl ProfileService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, id: UserId) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, email, phone, role, created_at, updated_at
            FROM profiles WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch profile")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Profile not found")))
    }

    /// List profiles, optionally restricted to holders of one registry role.
    #[instrument(skip(db))]
    pub async fn get_profiles(
        db: &PgPool,
        params: &ProfileFilterParams,
    ) -> Result<(Vec<Profile>, i64), AppError> {
        let limit = params.pagination.limit();
        let offset = params.pagination.offset();

        let (profiles, total) = if let Some(role) = params.role {
            let profiles = sqlx::query_as::<_, Profile>(
                r#"
                SELECT p.id, p.full_name, p.email, p.phone, p.role, p.created_at, p.updated_at
                FROM profiles p
                JOIN user_roles ur ON ur.user_id = p.id
                WHERE ur.role = $1
                ORDER BY p.full_name
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(role)
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

            let total = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM user_roles WHERE role = $1",
            )
            .bind(role)
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;

            (profiles, total)
        } else {
            let profiles = sqlx::query_as::<_, Profile>(
                r#"
                SELECT id, full_name, email, phone, role, created_at, updated_at
                FROM profiles
                ORDER BY full_name
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

            let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

            (profiles, total)
        };

        Ok((profiles, total))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        id: UserId,
        dto: UpdateProfileDto,
    ) -> Result<Profile, AppError> {
        let existing = Self::get_profile(db, id).await?;

        let full_name = dto.full_name.unwrap_or(existing.full_name);
        let phone = dto.phone.or(existing.phone);

        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = $1, phone = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, full_name, email, phone, role, created_at, updated_at
            "#,
        )
        .bind(&full_name)
        .bind(&phone)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update profile")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_profile(db: &PgPool, id: UserId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete profile")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Profile not found")));
        }

        Ok(())
    }

    /// Profiles holding the teacher role, for batch assignment pickers.
    #[instrument(skip(db))]
    pub async fn get_teachers(db: &PgPool) -> Result<Vec<Profile>, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT p.id, p.full_name, p.email, p.phone, p.role, p.created_at, p.updated_at
            FROM profiles p
            JOIN user_roles ur ON ur.user_id = p.id
            WHERE ur.role = $1
            ORDER BY p.full_name
            "#,
        )
        .bind(Role::Teacher)
        .fetch_all(db)
        .await
        .context("Failed to fetch teachers")
        .map_err(AppError::database)
    }
}
