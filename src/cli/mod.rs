//! Bootstrap commands invoked from `main` before the server starts.

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Create the first admin account. Admins cannot be created through the
/// API, so a fresh deployment runs `gurukul create-admin ...` once.
pub async fn create_admin(
    pool: &PgPool,
    full_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let existing = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM profiles WHERE email = $1)",
    )
    .bind(email)
    .fetch_one(pool)
    .await?;

    if existing {
        anyhow::bail!("A profile with email {} already exists", email);
    }

    let hashed = hash_password(password).map_err(|e| e.error)?;

    let mut tx = pool.begin().await?;

    let user_id = sqlx::query_scalar::<_, uuid::Uuid>(
        r#"
        INSERT INTO profiles (full_name, email, role, password)
        VALUES ($1, $2, 'admin', $3)
        RETURNING id
        "#,
    )
    .bind(full_name)
    .bind(email)
    .bind(&hashed)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, 'admin')")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}
