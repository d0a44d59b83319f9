//! Subject and subject instance HTTP handlers

use axum::{
    extract::{Path, State},
    http::{Method, Uri},
    response::Response,
};

use crate::models::{SubjectCreateRequest, SubjectInstanceCreateRequest};
use crate::web::{
    AppState,
    extractors::{JsonBody, RequestContext, SubjectInstanceFilterParams},
    responses::{created, handle_error, ok},
    utils::log_request,
};

#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    tag = "subjects",
    responses(
        (status = 200, description = "All subjects ordered by code"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_subjects(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.list_subjects().await {
        Ok(subjects) => ok(subjects),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    tag = "subjects",
    request_body = SubjectCreateRequest,
    responses(
        (status = 201, description = "Subject created", body = crate::models::Subject),
        (status = 400, description = "Missing code or non-positive units"),
        (status = 409, description = "Subject code already exists"),
    )
)]
pub async fn create_subject(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<SubjectCreateRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.create_subject(request).await {
        Ok(subject) => created(subject),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/subjects/{id}",
    tag = "subjects",
    params(("id" = i32, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject details", body = crate::models::Subject),
        (status = 404, description = "Subject not found"),
    )
)]
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.get_subject(id).await {
        Ok(subject) => ok(subject),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/subject-instances",
    tag = "subjects",
    params(SubjectInstanceFilterParams),
    responses(
        (status = 200, description = "Subject offerings, latest school year first"),
        (status = 400, description = "Invalid filter"),
    )
)]
pub async fn list_subject_instances(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    filter: SubjectInstanceFilterParams,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.list_subject_instances(filter.subject_id).await {
        Ok(instances) => ok(instances),
        Err(e) => handle_error(e),
    }
}

/// Offer a subject in a school year and semester
#[utoipa::path(
    post,
    path = "/api/v1/subject-instances",
    tag = "subjects",
    request_body = SubjectInstanceCreateRequest,
    responses(
        (status = 201, description = "Subject instance created", body = crate::models::SubjectInstance),
        (status = 400, description = "Invalid school year or instructor"),
        (status = 404, description = "Subject or instructor not found"),
    )
)]
pub async fn create_subject_instance(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<SubjectInstanceCreateRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.create_subject_instance(request).await {
        Ok(instance) => created(instance),
        Err(e) => handle_error(e),
    }
}
