//! Roster saves replace the stored set; summaries derive from what is stored.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{
    authed_get, authed_json_request, create_test_batch, create_test_class, create_test_student,
    create_test_user, generate_unique_email, get_auth_token, read_json, setup_test_app,
};

#[sqlx::test(migrations = "./migrations")]
async fn saved_roster_exactly_matches_submission(pool: PgPool) {
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", &["admin"]).await;

    let batch_id = create_test_batch(&pool, "Batch Roster").await;
    let class_id = create_test_class(&pool, batch_id, "2024-01-15").await;

    let mut students = Vec::new();
    for _ in 0..3 {
        let user =
            create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
        create_test_student(&pool, user.id, Some(batch_id)).await;
        students.push(user.id);
    }

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, "password123").await;

    // First save: all three present.
    let records: Vec<_> = students
        .iter()
        .map(|id| json!({"student_id": id, "is_present": true}))
        .collect();
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/attendance/class/{}", class_id),
            &token,
            json!({"records": records}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 3);

    // Second save drops one student; the stored set must shrink with it.
    let records: Vec<_> = students[..2]
        .iter()
        .map(|id| json!({"student_id": id, "is_present": false}))
        .collect();
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/attendance/class/{}", class_id),
            &token,
            json!({"records": records}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/attendance/class/{}", class_id),
            &token,
        ))
        .await
        .unwrap();
    let roster = read_json(response).await;
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 2, "no orphaned rows from the previous roster");
    for row in roster {
        assert_eq!(row["is_present"], false);
        let id = row["student_id"].as_str().unwrap();
        assert!(students[..2].iter().any(|s| s.to_string() == id));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_save_preserves_previous_roster(pool: PgPool) {
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", &["admin"]).await;

    let batch_id = create_test_batch(&pool, "Batch Atomic").await;
    let class_id = create_test_class(&pool, batch_id, "2024-01-16").await;

    let student =
        create_test_user(&pool, &generate_unique_email(), "password123", &["student"]).await;
    create_test_student(&pool, student.id, Some(batch_id)).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/attendance/class/{}", class_id),
            &token,
            json!({"records": [{"student_id": student.id, "is_present": true}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A roster referencing a non-existent student fails the insert; the
    // transaction must roll the delete back too.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/attendance/class/{}", class_id),
            &token,
            json!({"records": [
                {"student_id": student.id, "is_present": false},
                {"student_id": uuid::Uuid::new_v4(), "is_present": true}
            ]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/attendance/class/{}", class_id),
            &token,
        ))
        .await
        .unwrap();
    let roster = read_json(response).await;
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 1, "previous roster must survive a failed save");
    assert_eq!(roster[0]["is_present"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_with_no_records_is_zero(pool: PgPool) {
    let student_email = generate_unique_email();
    let student = create_test_user(&pool, &student_email, "password123", &["student"]).await;
    create_test_student(&pool, student.id, None).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &student_email, "password123").await;

    let app = setup_test_app(pool).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/attendance/student/{}/summary", student.id),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["total"], 0);
    assert_eq!(body["present"], 0);
    assert_eq!(body["percentage"], 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_flow_ends_with_full_attendance(pool: PgPool) {
    // Create batch, enroll student, schedule class, mark present, read 100%.
    let admin_email = generate_unique_email();
    create_test_user(&pool, &admin_email, "password123", &["admin"]).await;

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &admin_email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/batches",
            &token,
            json!({"name": "Batch A", "board": "cbse", "grade": "10", "mode": "online"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let batch = read_json(response).await;
    let batch_id = batch["id"].as_str().unwrap().to_string();
    assert_eq!(batch["board"], "cbse");
    assert_eq!(batch["mode"], "online");

    let student_email = generate_unique_email();
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/students",
            &token,
            json!({
                "full_name": "S One",
                "email": student_email,
                "password": "password123",
                "board": "cbse",
                "grade": "10",
                "batch_id": batch_id
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let student = read_json(response).await;
    let student_id = student["id"].as_str().unwrap().to_string();
    assert_eq!(student["batch_id"].as_str().unwrap(), batch_id);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "POST",
            "/api/classes",
            &token,
            json!({
                "batch_id": batch_id,
                "subject": "Physics",
                "date": "2024-01-15",
                "time": "10:00:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let class = read_json(response).await;
    let class_id = class["id"].as_str().unwrap().to_string();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_json_request(
            "PUT",
            &format!("/api/attendance/class/{}", class_id),
            &token,
            json!({"records": [{"student_id": student_id, "is_present": true}]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(authed_get(
            &format!("/api/attendance/student/{}/summary", student_id),
            &token,
        ))
        .await
        .unwrap();
    let summary = read_json(response).await;
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["present"], 1);
    assert_eq!(summary["percentage"], 100.0);
}
