use sqlx::PgPool;

use gurukul_core::file_storage::LocalFileStorage;

use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;
use crate::config::rate_limit::RateLimitConfig;
use crate::config::storage::StorageConfig;
use crate::realtime::ChangeFeed;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub storage_config: StorageConfig,
    pub storage: LocalFileStorage,
    pub changes: ChangeFeed,
}

pub async fn init_app_state() -> AppState {
    let storage_config = StorageConfig::from_env();
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        storage: storage_config.storage(),
        storage_config,
        changes: ChangeFeed::default(),
    }
}
