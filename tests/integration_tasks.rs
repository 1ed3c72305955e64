//! Submission upserts: one row per (task, student), latest value wins.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_get, authed_json_request, create_test_batch, create_test_student, create_test_user,
    generate_unique_email, get_auth_token, read_json, setup_test_app,
};

async fn seed_task(pool: &PgPool, batch_id: uuid::Uuid) -> uuid::Uuid {
    sqlx::query_scalar::<_, uuid::Uuid>(
        r#"
        INSERT INTO tasks (batch_id, title, due_date)
        VALUES ($1, 'Worksheet 4', '2024-02-01')
        RETURNING id
        "#,
    )
    .bind(batch_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn submission_upsert_keeps_one_row_with_latest_value(pool: PgPool) {
    let batch_id = create_test_batch(&pool, "Batch Tasks").await;
    let task_id = seed_task(&pool, batch_id).await;

    let student_email = generate_unique_email();
    let student = create_test_user(&pool, &student_email, "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_id)).await;

    let staff_email = generate_unique_email();
    create_test_user(&pool, &staff_email, "password123", &["teacher"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &student_email, "password123").await;

    // Complete, then un-complete.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tasks/{}/submission", task_id),
            &token,
            json!({"is_completed": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["is_completed"], true);
    assert!(body["submitted_at"].as_str().is_some());

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tasks/{}/submission", task_id),
            &token,
            json!({"is_completed": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["is_completed"], false);

    // Staff sees exactly one row holding the latest value.
    let app = setup_test_app(pool.clone()).await;
    let staff_token = get_auth_token(app, &staff_email, "password123").await;
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/tasks/{}/submissions", task_id),
            &staff_token,
        ))
        .await
        .unwrap();
    let submissions = read_json(response).await;
    let submissions = submissions.as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["is_completed"], false);
    assert_eq!(
        submissions[0]["student_id"].as_str().unwrap(),
        student.id.to_string()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn grading_attaches_to_the_same_row(pool: PgPool) {
    let batch_id = create_test_batch(&pool, "Batch Grading").await;
    let task_id = seed_task(&pool, batch_id).await;

    let student_email = generate_unique_email();
    let student = create_test_user(&pool, &student_email, "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_id)).await;

    let staff_email = generate_unique_email();
    create_test_user(&pool, &staff_email, "password123", &["teacher"]).await;

    let app = setup_test_app(pool.clone()).await;
    let student_token = get_auth_token(app, &student_email, "password123").await;
    let app = setup_test_app(pool.clone()).await;
    let staff_token = get_auth_token(app, &staff_email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    app.oneshot(authed_json_request(
        "PUT",
        &format!("/api/tasks/{}/submission", task_id),
        &student_token,
        json!({"is_completed": true}),
    ))
    .await
    .unwrap();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tasks/{}/submissions/{}/grade", task_id, student.id),
            &staff_token,
            json!({"grade": 85}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["grade"], 85);
    assert_eq!(body["is_completed"], true);

    // Student view folds the graded submission into the task list.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/tasks/student/{}", student.id),
            &student_token,
        ))
        .await
        .unwrap();
    let tasks = read_json(response).await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["grade"], 85);
}

#[sqlx::test(migrations = "./migrations")]
async fn non_students_cannot_submit(pool: PgPool) {
    let batch_id = create_test_batch(&pool, "Batch Deny").await;
    let task_id = seed_task(&pool, batch_id).await;

    let parent_email = generate_unique_email();
    create_test_user(&pool, &parent_email, "password123", &["parent"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &parent_email, "password123").await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/tasks/{}/submission", task_id),
            &token,
            json!({"is_completed": true}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
