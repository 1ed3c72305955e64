mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_get, create_test_user, generate_unique_email, get_auth_token, read_json,
    setup_test_app,
};

fn register_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::from(
            serde_json::to_string(&json!({
                "full_name": "New Student",
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn register_creates_student_account(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let response = app.oneshot(register_request(&email, "password123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["email"], email);
    assert_eq!(body["full_name"], "New Student");

    // Signup lands in the registry with the student role only.
    let app = setup_test_app(pool.clone()).await;
    let login = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .header("x-forwarded-for", "127.0.0.1")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "email": email,
                        "password": "password123"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);

    let body = read_json(login).await;
    assert!(body["access_token"].as_str().is_some());
    assert_eq!(body["roles"], json!(["student"]));
    assert_eq!(body["redirect_to"], "/student");
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", &["student"]).await;

    let app = setup_test_app(pool).await;
    let response = app.oneshot(register_request(&email, "password123")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_rejects_bad_password(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", &["student"]).await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .header("x-forwarded-for", "127.0.0.1")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "email": email,
                        "password": "wrong-password"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_redirect_follows_role_priority(pool: PgPool) {
    // A user holding both admin and student lands on the admin dashboard.
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", &["student", "admin"]).await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .header("x-forwarded-for", "127.0.0.1")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "email": email,
                        "password": "password123"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let body = read_json(response).await;
    assert_eq!(body["redirect_to"], "/admin");
}

#[sqlx::test(migrations = "./migrations")]
async fn me_returns_current_profile(pool: PgPool) {
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", &["student"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "password123").await;

    let app = setup_test_app(pool).await;
    let response = app.oneshot(authed_get("/api/auth/me", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["email"], email);
}

#[sqlx::test(migrations = "./migrations")]
async fn me_requires_a_token(pool: PgPool) {
    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header("x-forwarded-for", "127.0.0.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
