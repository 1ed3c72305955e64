//! Parent linkage and per-student access checks.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_get, authed_json_request, create_test_batch, create_test_student, create_test_user,
    generate_unique_email, get_auth_token, read_json, setup_test_app,
};

async fn link_parent(pool: &PgPool, student_id: uuid::Uuid, parent_id: uuid::Uuid) {
    sqlx::query("UPDATE students SET parent_id = $1 WHERE id = $2")
        .bind(parent_id)
        .bind(student_id)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn parent_sees_linked_children_only(pool: PgPool) {
    let parent_email = generate_unique_email();
    let parent = create_test_user(&pool, &parent_email, "password123", &["parent"]).await;

    let child = create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
    create_test_student(&pool, child.id, None).await;
    link_parent(&pool, child.id, parent.id).await;

    let unrelated =
        create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
    create_test_student(&pool, unrelated.id, None).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &parent_email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get("/api/students/children", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let children = read_json(response).await;
    let children = children.as_array().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0]["id"].as_str().unwrap(), child.id.to_string());

    // Child's records are reachable, the unrelated student's are not.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/attendance/student/{}/summary", child.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/attendance/student/{}/summary", unrelated.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_get(&format!("/api/fees/student/{}", unrelated.id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn student_reads_own_record_but_not_others(pool: PgPool) {
    let email_a = generate_unique_email();
    let a = create_test_user(&pool, &email_a, "password123", &["student"]).await;
    create_test_student(&pool, a.id, None).await;

    let b = create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
    create_test_student(&pool, b.id, None).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &email_a, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(&format!("/api/students/{}", a.id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_get(&format!("/api/students/{}", b.id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn batch_assignment_moves_and_clears(pool: PgPool) {
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", &["admin"]).await;

    let batch_a = create_test_batch(&pool, "Batch A").await;
    let batch_b = create_test_batch(&pool, "Batch B").await;

    let student =
        create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_a)).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/students/{}/batch", student.id),
            &token,
            json!({"batch_id": batch_b}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await["batch_id"].as_str().unwrap(),
        batch_b.to_string()
    );

    // Null unassigns.
    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/students/{}/batch", student.id),
            &token,
            json!({"batch_id": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_json(response).await["batch_id"].is_null());
}
