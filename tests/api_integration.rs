//! HTTP API integration tests
//!
//! Drive the full router through `axum_test::TestServer` against an
//! in-memory database and check statuses and response envelopes.

use axum::{body::Bytes, http::StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};

use grading_system::{
    config::Config,
    database::Database,
    web::{AppState, create_router},
};

async fn create_test_server() -> TestServer {
    let mut config = Config::default();
    config.accounts.password_hash_iterations = 10;
    let database = Database::new_in_memory()
        .await
        .expect("Failed to create test database");
    let state = AppState::new(config, database).expect("Failed to create app state");
    TestServer::new(create_router(state)).unwrap()
}

async fn create_user(server: &TestServer, username: &str, account_type: &str) -> i64 {
    let response = server
        .post("/api/v1/users")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.edu"),
            "password": "secret",
            "first_name": "juan",
            "last_name": "dela cruz",
            "account_type": account_type,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["user"]["id"].as_i64().unwrap()
}

async fn create_offering(server: &TestServer, code: &str, units: i32) -> i64 {
    let subject: Value = server
        .post("/api/v1/subjects")
        .json(&json!({"subject_code": code, "units": units}))
        .await
        .json();
    let subject_id = subject["data"]["id"].as_i64().unwrap();

    let response = server
        .post("/api/v1/subject-instances")
        .json(&json!({
            "subject_id": subject_id,
            "school_year": "2025-2026",
            "semester": "1st",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_reports_database() {
    let server = create_test_server().await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], "connected");
}

#[tokio::test]
async fn test_create_user_returns_profile_and_labels() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/users")
        .json(&json!({
            "username": "jdc",
            "email": "jdc@Example.EDU",
            "password": "secret",
            "first_name": "juan",
            "middle_name": "santos",
            "last_name": "dela cruz",
            "account_type": "faculty",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "jdc@example.edu");
    assert_eq!(body["data"]["user"]["full_name"], "Juan Santos Dela Cruz");
    assert_eq!(body["data"]["user"]["account_type_label"], "Faculty");
    assert_eq!(body["data"]["profile"]["kind"], "faculty");
    assert_eq!(body["data"]["profile"]["is_chairperson"], false);
    assert!(body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_validation_messages() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/users")
        .json(&json!({"username": "x", "password": "secret"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Users must have an email address!");

    let response = server
        .post("/api/v1/users")
        .json(&json!({
            "username": "x",
            "email": "x@example.edu",
            "password": "secret",
            "first_name": "X",
            "last_name": "Y",
            "account_type": "---Select---",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Users must have account type!");
}

#[tokio::test]
async fn test_user_lifecycle_statuses() {
    let server = create_test_server().await;
    let id = create_user(&server, "cycle", "Student").await;

    let duplicate = server
        .post("/api/v1/users")
        .json(&json!({
            "username": "cycle",
            "email": "other@example.edu",
            "password": "secret",
            "first_name": "A",
            "last_name": "B",
            "account_type": "Student",
        }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let listed: Value = server.get("/api/v1/users?page=1&limit=10").await.json();
    assert_eq!(listed["data"]["total"], 1);
    assert_eq!(listed["data"]["items"][0]["username"], "cycle");

    let bad_page = server.get("/api/v1/users?limit=0").await;
    assert_eq!(bad_page.status_code(), StatusCode::BAD_REQUEST);

    let updated = server
        .put(&format!("/api/v1/users/{id}"))
        .json(&json!({"phone_number": "+63-917-1234-567"}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);

    let bad_phone = server
        .put(&format!("/api/v1/users/{id}"))
        .json(&json!({"phone_number": "12345"}))
        .await;
    assert_eq!(bad_phone.status_code(), StatusCode::BAD_REQUEST);

    let deactivated: Value = server
        .put(&format!("/api/v1/users/{id}/active"))
        .json(&json!({"is_active": false}))
        .await
        .json();
    assert_eq!(deactivated["data"]["is_active"], false);

    let profile: Value = server
        .get(&format!("/api/v1/users/{id}/profile"))
        .await
        .json();
    assert_eq!(profile["data"]["kind"], "student");

    let chair = server
        .put(&format!("/api/v1/users/{id}/chairperson"))
        .json(&json!({"is_chairperson": true}))
        .await;
    assert_eq!(chair.status_code(), StatusCode::BAD_REQUEST);

    let deleted = server.delete(&format!("/api/v1/users/{id}")).await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = server.get(&format!("/api/v1/users/{id}")).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_enrollment_and_gpa_flow() {
    let server = create_test_server().await;
    let student = create_user(&server, "student", "Student").await;
    let faculty = create_user(&server, "faculty", "Faculty").await;
    let math = create_offering(&server, "MATH 11", 3).await;
    let eng = create_offering(&server, "ENG 1", 2).await;
    let nstp = create_offering(&server, "NSTP 1", 3).await;

    let status: Value = server
        .get(&format!("/api/v1/subject-instances/{math}/enrollments/{student}"))
        .await
        .json();
    assert_eq!(status["data"]["enrolled"], false);

    let mut subject_grade_ids = Vec::new();
    for (instance, grade) in [(math, "1.25"), (eng, "2.5"), (nstp, "1.0")] {
        let enrolled = server
            .post(&format!("/api/v1/subject-instances/{instance}/enrollments"))
            .json(&json!({"user_id": student}))
            .await;
        assert_eq!(enrolled.status_code(), StatusCode::CREATED);
        let body: Value = enrolled.json();
        let subject_grade_id = body["data"]["id"].as_i64().unwrap();

        let graded = server
            .put(&format!("/api/v1/subject-grades/{subject_grade_id}"))
            .json(&json!({"final_grade": grade}))
            .await;
        assert_eq!(graded.status_code(), StatusCode::OK);
        subject_grade_ids.push(subject_grade_id);
    }

    let again = server
        .post(&format!("/api/v1/subject-instances/{math}/enrollments"))
        .json(&json!({"user_id": student}))
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);

    let status: Value = server
        .get(&format!("/api/v1/subject-instances/{math}/enrollments/{student}"))
        .await
        .json();
    assert_eq!(status["data"]["enrolled"], true);

    let status: Value = server
        .get(&format!("/api/v1/subject-instances/{math}/enrollments/{faculty}"))
        .await
        .json();
    assert_eq!(status["data"]["enrolled"], false);

    let unknown = server
        .get(&format!("/api/v1/subject-instances/9999/enrollments/{student}"))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let out_of_range = server
        .put(&format!("/api/v1/subject-grades/{}", subject_grade_ids[0]))
        .json(&json!({"final_grade": "7"}))
        .await;
    assert_eq!(out_of_range.status_code(), StatusCode::BAD_REQUEST);

    let created = server
        .post("/api/v1/semester-grades")
        .json(&json!({
            "user_id": student,
            "school_year": "2025-2026",
            "semester": "1st",
            "subject_grade_ids": subject_grade_ids,
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body: Value = created.json();
    let semester_grade_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["grade"], "");

    // (1.25 * 3 + 2.5 * 2) / 5, NSTP excluded
    let gpa: Value = server
        .post(&format!("/api/v1/semester-grades/{semester_grade_id}/gpa"))
        .await
        .json();
    assert_eq!(gpa["data"]["grade"], "1.75");

    let stored: Value = server
        .get(&format!("/api/v1/semester-grades/{semester_grade_id}"))
        .await
        .json();
    assert_eq!(stored["data"]["grade"], "1.75");

    let listed: Value = server
        .get(&format!("/api/v1/users/{student}/semester-grades"))
        .await
        .json();
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);

    let missing = server.post("/api/v1/semester-grades/4040/gpa").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = create_test_server().await;

    let response = server.get("/api/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["paths"]["/api/v1/semester-grades/{id}/gpa"].is_object());
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let server = create_test_server().await;

    let response = server
        .post("/api/v1/users")
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));

    let response = server.post("/api/v1/subjects").text("subject_code=CS").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);

    let response = server
        .post("/api/v1/subjects")
        .json(&json!({"subject_code": "CS 11", "units": "three"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["timestamp"].is_string());
}
