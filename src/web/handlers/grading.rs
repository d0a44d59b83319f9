//! Enrollment, final grade and semester GPA HTTP handlers

use axum::{
    extract::{Path, State},
    http::{Method, Uri},
    response::Response,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::SemesterGradeCreateRequest;
use crate::web::{
    AppState,
    extractors::{JsonBody, RequestContext},
    responses::{created, handle_error, ok},
    utils::log_request,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EnrollmentRequest {
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentStatus {
    pub user_id: i32,
    pub subject_instance_id: i32,
    pub enrolled: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FinalGradeRequest {
    /// A number from 1.0 to 5.0, or one of the markers P, W, D, NOT S, INC
    pub final_grade: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GpaResponse {
    pub semester_grade_id: i32,
    /// Empty when no subject carried gradable units
    pub grade: String,
}

/// Enroll a student in a subject instance
#[utoipa::path(
    post,
    path = "/api/v1/subject-instances/{id}/enrollments",
    tag = "grading",
    params(("id" = i32, Path, description = "Subject instance ID")),
    request_body = EnrollmentRequest,
    responses(
        (status = 201, description = "Enrolled; an ungraded subject grade was created", body = crate::models::SubjectGrade),
        (status = 400, description = "User is not a student"),
        (status = 404, description = "User or subject instance not found"),
        (status = 409, description = "Already enrolled"),
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<EnrollmentRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.enroll(request.user_id, id).await {
        Ok(grade) => created(grade),
        Err(e) => handle_error(e),
    }
}

/// Whether a user is enrolled in a subject instance
#[utoipa::path(
    get,
    path = "/api/v1/subject-instances/{id}/enrollments/{user_id}",
    tag = "grading",
    params(
        ("id" = i32, Path, description = "Subject instance ID"),
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Enrollment status", body = EnrollmentStatus),
        (status = 404, description = "User or subject instance not found"),
    )
)]
pub async fn enrollment_status(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(i32, i32)>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.is_already_enrolled(user_id, id).await {
        Ok(enrolled) => ok(EnrollmentStatus {
            user_id,
            subject_instance_id: id,
            enrolled,
        }),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/subject-grades/{id}",
    tag = "grading",
    params(("id" = i32, Path, description = "Subject grade ID")),
    request_body = FinalGradeRequest,
    responses(
        (status = 200, description = "Final grade recorded", body = crate::models::SubjectGrade),
        (status = 400, description = "Grade is neither a marker nor in range"),
        (status = 404, description = "Subject grade not found"),
    )
)]
pub async fn record_final_grade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<FinalGradeRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state
        .grading
        .record_final_grade(id, &request.final_grade)
        .await
    {
        Ok(grade) => ok(grade),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/semester-grades",
    tag = "grading",
    request_body = SemesterGradeCreateRequest,
    responses(
        (status = 201, description = "Semester grade created", body = crate::models::SemesterGrade),
        (status = 400, description = "Not a student, bad school year or foreign subject grade"),
        (status = 404, description = "User or subject grade not found"),
    )
)]
pub async fn create_semester_grade(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<SemesterGradeCreateRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.create_semester_grade(request).await {
        Ok(grade) => created(grade),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/semester-grades/{id}",
    tag = "grading",
    params(("id" = i32, Path, description = "Semester grade ID")),
    responses(
        (status = 200, description = "Semester grade", body = crate::models::SemesterGrade),
        (status = 404, description = "Semester grade not found"),
    )
)]
pub async fn get_semester_grade(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.get_semester_grade(id).await {
        Ok(grade) => ok(grade),
        Err(e) => handle_error(e),
    }
}

/// Recompute and store the GPA of a semester grade
#[utoipa::path(
    post,
    path = "/api/v1/semester-grades/{id}/gpa",
    tag = "grading",
    params(("id" = i32, Path, description = "Semester grade ID")),
    responses(
        (status = 200, description = "Computed GPA", body = GpaResponse),
        (status = 404, description = "Semester grade not found"),
    )
)]
pub async fn compute_gpa(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.compute_gpa(id).await {
        Ok(grade) => ok(GpaResponse {
            semester_grade_id: id,
            grade,
        }),
        Err(e) => handle_error(e),
    }
}
