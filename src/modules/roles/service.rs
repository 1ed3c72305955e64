//! Role registry management.
//!
//! The registry is the single authoritative permission source; the
//! denormalized `profiles.role` column is refreshed opportunistically so
//! legacy displays stay roughly right, but nothing reads it for access
//! decisions.

use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

use gurukul_models::ids::UserId;
use gurukul_models::{primary_role, Role};

use crate::utils::errors::AppError;

pub struct RoleService;

impl RoleService {
    #[instrument(skip(db))]
    pub async fn get_roles(db: &PgPool, user_id: UserId) -> Result<Vec<Role>, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)")
                .bind(user_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Profile not found")));
        }

        sqlx::query_scalar::<_, Role>(
            "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role",
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch user roles")
        .map_err(AppError::database)
    }

    /// Grant a role; idempotent thanks to the (user, role) uniqueness.
    #[instrument(skip(db))]
    pub async fn assign_role(
        db: &PgPool,
        user_id: UserId,
        role: Role,
    ) -> Result<Vec<Role>, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::not_found(anyhow::anyhow!("Profile not found"));
                }
            }
            AppError::database(anyhow::Error::from(e))
        })?;

        let roles = sqlx::query_scalar::<_, Role>(
            "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::database)?;

        if let Some(primary) = primary_role(&roles) {
            sqlx::query("UPDATE profiles SET role = $1, updated_at = now() WHERE id = $2")
                .bind(primary)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;

        Ok(roles)
    }

    #[instrument(skip(db))]
    pub async fn revoke_role(
        db: &PgPool,
        user_id: UserId,
        role: Role,
    ) -> Result<Vec<Role>, AppError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role = $2")
            .bind(user_id)
            .bind(role)
            .execute(db)
            .await
            .context("Failed to revoke role")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "User does not hold that role"
            )));
        }

        Self::get_roles(db, user_id).await
    }
}
