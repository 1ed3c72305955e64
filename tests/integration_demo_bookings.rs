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

#[sqlx::test(migrations = "./migrations")]
async fn booking_needs_no_session_and_stores_exact_fields(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/demo-bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "full_name": "Asha Rao",
                        "email": "asha@example.com",
                        "phone": "9876543210",
                        "board": "icse",
                        "preferred_mode": "offline"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["board"], "icse");
    assert_eq!(body["preferred_mode"], "offline");
    assert_eq!(body["full_name"], "Asha Rao");

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM demo_bookings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // No profile came out of it.
    let profiles = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM profiles WHERE email = 'asha@example.com'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(profiles, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_rejects_unknown_board(pool: PgPool) {
    let app = setup_test_app(pool).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/demo-bookings")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "full_name": "Asha Rao",
                        "email": "asha@example.com",
                        "phone": "9876543210",
                        "board": "ib",
                        "preferred_mode": "offline"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn only_admins_list_bookings(pool: PgPool) {
    let student_email = generate_unique_email();
    create_test_user(&pool, &student_email, "password123", &["student"]).await;
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", &["admin"]).await;

    let app = setup_test_app(pool.clone()).await;
    let student_token = get_auth_token(app, &student_email, "password123").await;
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get("/api/demo-bookings", &student_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = setup_test_app(pool.clone()).await;
    let admin_token = get_auth_token(app, &admin_email, "password123").await;
    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_get("/api/demo-bookings", &admin_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
