//! The access gate must fail closed: no registry row, no entry.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_get, authed_json_request, create_test_user, generate_unique_email, get_auth_token,
    read_json, setup_test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn user_without_roles_is_denied_everywhere(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", &[]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "password123").await;

    for uri in [
        "/api/profiles",
        "/api/roles/00000000-0000-0000-0000-000000000001",
        "/api/batches",
        "/api/fees",
        "/api/demo-bookings",
    ] {
        let app = setup_test_app(pool.clone()).await;
        let response = app.oneshot(authed_get(uri, &token)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "open gate at {}", uri);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn student_cannot_reach_admin_surfaces(pool: PgPool) {
    let email = generate_unique_email();
    create_test_user(&pool, &email, "password123", &["student"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app.oneshot(authed_get("/api/profiles", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/batches",
            &token,
            json!({"name": "Sneaky", "board": "cbse", "grade": "10", "mode": "online"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_can_manage_the_registry(pool: PgPool) {
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", &["admin"]).await;

    let target_email = generate_unique_email();
    let target = create_test_user(&pool, &target_email, "password123", &["student"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, "password123").await;

    // Grant teacher on top of student.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "POST",
            &format!("/api/roles/{}", target.id),
            &token,
            json!({"role": "teacher"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let roles = body["roles"].as_array().unwrap();
    assert!(roles.contains(&json!("teacher")));
    assert!(roles.contains(&json!("student")));

    // Granting twice stays idempotent.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "POST",
            &format!("/api/roles/{}", target.id),
            &token,
            json!({"role": "teacher"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["roles"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|r| **r == json!("teacher"))
            .count(),
        1
    );

    // Revoke it again.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "DELETE",
            &format!("/api/roles/{}/teacher", target.id),
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert!(!body["roles"].as_array().unwrap().contains(&json!("teacher")));
}

#[sqlx::test(migrations = "./migrations")]
async fn revoked_role_locks_the_user_out_immediately(pool: PgPool) {
    // Roles live in the registry, not the token: revoking while a token is
    // still valid must deny the next request.
    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "password123", &["admin"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app.oneshot(authed_get("/api/profiles", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool).await;
    let response = app.oneshot(authed_get("/api/profiles", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
