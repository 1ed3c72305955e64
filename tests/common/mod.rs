#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use gurukul::config::cors::CorsConfig;
use gurukul::config::jwt::JwtConfig;
use gurukul::config::rate_limit::RateLimitConfig;
use gurukul::config::storage::StorageConfig;
use gurukul::realtime::ChangeFeed;
use gurukul::router::init_router;
use gurukul::state::AppState;
use gurukul::utils::password::hash_password;

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let storage_config = StorageConfig::from_env();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
        storage: storage_config.storage(),
        storage_config,
        changes: ChangeFeed::default(),
    };
    init_router(state)
}

/// Create a profile plus a registry role. Pass `roles: &[]` for a user that
/// holds nothing at all.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    roles: &[&str],
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO profiles (full_name, email, password)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind("Test User")
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    for role in roles {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role) VALUES ($1, $2::app_role) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(role)
        .execute(pool)
        .await
        .unwrap();
    }

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Attach a student record to an existing profile.
pub async fn create_test_student(pool: &PgPool, profile_id: Uuid, batch_id: Option<Uuid>) {
    sqlx::query(
        r#"
        INSERT INTO students (id, board, grade, batch_id)
        VALUES ($1, 'cbse', '10', $2)
        ON CONFLICT (id) DO UPDATE SET batch_id = EXCLUDED.batch_id
        "#,
    )
    .bind(profile_id)
    .bind(batch_id)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_batch(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO batches (name, board, grade, mode)
        VALUES ($1, 'cbse', '10', 'online')
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_class(pool: &PgPool, batch_id: Uuid, date: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO classes (batch_id, subject, date, time)
        VALUES ($1, 'Mathematics', $2::date, '10:00')
        RETURNING id
        "#,
    )
    .bind(batch_id)
    .bind(date)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Login through the real endpoint and return the bearer token.
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"]
        .as_str()
        .expect("login response must carry a token")
        .to_string()
}

pub fn authed_json_request(
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn authed_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::empty())
        .unwrap()
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}
