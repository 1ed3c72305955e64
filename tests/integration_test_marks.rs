//! Mark sheets: replace-all saves and derived grade bands.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_get, authed_json_request, create_test_batch, create_test_student, create_test_user,
    generate_unique_email, get_auth_token, read_json, setup_test_app,
};

async fn seed_test(pool: &PgPool, batch_id: uuid::Uuid, max_marks: i32) -> uuid::Uuid {
    sqlx::query_scalar::<_, uuid::Uuid>(
        r#"
        INSERT INTO tests (batch_id, subject, test_date, max_marks)
        VALUES ($1, 'Chemistry', '2024-03-01', $2)
        RETURNING id
        "#,
    )
    .bind(batch_id)
    .bind(max_marks)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn saved_sheet_replaces_previous_and_derives_bands(pool: PgPool) {
    let staff_email = generate_unique_email();
    create_test_user(&pool, &staff_email, "password123", &["teacher"]).await;

    let batch_id = create_test_batch(&pool, "Batch Marks").await;
    let test_id = seed_test(&pool, batch_id, 50).await;

    let student_email = generate_unique_email();
    let student = create_test_user(&pool, &student_email, "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_id)).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &staff_email, "password123").await;

    // First save: 40/50.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tests/{}/marks", test_id),
            &token,
            json!({"entries": [{"student_id": student.id, "marks_obtained": 40}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second save overwrites with 45/50 (90% exactly -> A+).
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tests/{}/marks", test_id),
            &token,
            json!({"entries": [{"student_id": student.id, "marks_obtained": 45}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let sheet = read_json(response).await;
    assert_eq!(sheet.as_array().unwrap().len(), 1);

    let app = setup_test_app(pool.clone()).await;
    let student_token = get_auth_token(app, &student_email, "password123").await;
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/tests/student/{}/marks", student.id),
            &student_token,
        ))
        .await
        .unwrap();
    let marks = read_json(response).await;
    let marks = marks.as_array().unwrap();
    assert_eq!(marks.len(), 1, "replace-all must not stack mark rows");
    assert_eq!(marks[0]["marks_obtained"], 45);
    assert_eq!(marks[0]["percentage"], 90.0);
    assert_eq!(marks[0]["grade"], "A+");
}

#[sqlx::test(migrations = "./migrations")]
async fn marks_above_max_are_rejected(pool: PgPool) {
    let staff_email = generate_unique_email();
    create_test_user(&pool, &staff_email, "password123", &["teacher"]).await;

    let batch_id = create_test_batch(&pool, "Batch Limits").await;
    let test_id = seed_test(&pool, batch_id, 50).await;

    let student =
        create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_id)).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &staff_email, "password123").await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tests/{}/marks", test_id),
            &token,
            json!({"entries": [{"student_id": student.id, "marks_obtained": 51}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn absent_students_keep_null_marks(pool: PgPool) {
    let staff_email = generate_unique_email();
    create_test_user(&pool, &staff_email, "password123", &["teacher"]).await;

    let batch_id = create_test_batch(&pool, "Batch Absent").await;
    let test_id = seed_test(&pool, batch_id, 100).await;

    let student_email = generate_unique_email();
    let student = create_test_user(&pool, &student_email, "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_id)).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &staff_email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tests/{}/marks", test_id),
            &token,
            json!({"entries": [
                {"student_id": student.id, "marks_obtained": null, "retest_eligible": true, "retest_date": "2024-03-15"}
            ]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let student_token = get_auth_token(app, &student_email, "password123").await;
    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/tests/student/{}/marks", student.id),
            &student_token,
        ))
        .await
        .unwrap();
    let marks = read_json(response).await;
    let marks = &marks.as_array().unwrap()[0];
    assert!(marks["marks_obtained"].is_null());
    assert!(marks["percentage"].is_null());
    assert!(marks["grade"].is_null());
    assert_eq!(marks["retest_eligible"], true);
}
