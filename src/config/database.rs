use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

/// Initialize the PostgreSQL connection pool from `DATABASE_URL`.
///
/// Called once at startup; the pool is cheaply cloneable and lives in
/// `AppState`. Panics if the variable is missing or the database is
/// unreachable, since the service cannot run without it.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
