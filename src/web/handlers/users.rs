//! User account HTTP handlers
//!
//! Thin wrappers around [`crate::services::AccountService`].

use axum::{
    extract::{Path, State},
    http::{Method, Uri},
    response::Response,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Account, NewUser, User, UserContactUpdate};
use crate::web::{
    AppState,
    extractors::{JsonBody, ListParams, RequestContext},
    responses::{PaginatedResponse, created, handle_error, no_content, ok},
    utils::{log_request, sanitize_search},
};

/// A user as returned by the API, with display helpers resolved
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    pub full_name: String,
    pub account_type_label: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            account_type_label: user.account_type_label().to_string(),
            user,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    pub user: UserResponse,
    pub profile: crate::models::Profile,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            user: account.user.into(),
            profile: account.profile,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetChairpersonRequest {
    pub is_chairperson: bool,
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-based)", example = 1),
        ("limit" = Option<u32>, Query, description = "Items per page (1-1000)", example = 50),
        ("search" = Option<String>, Query, description = "Search username, email or name"),
    ),
    responses(
        (status = 200, description = "Page of users"),
        (status = 400, description = "Invalid query parameters"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    list_params: ListParams,
) -> Response {
    log_request(&method, &uri, &context);

    let page = list_params.pagination.page;
    let limit = list_params.pagination.limit;
    let search = sanitize_search(list_params.search.search);

    match state
        .accounts
        .list_users(u64::from(page), u64::from(limit), search.as_deref())
        .await
    {
        Ok((users, total)) => {
            let items = users.into_iter().map(UserResponse::from).collect();
            ok(PaginatedResponse::new(items, total, page, limit))
        }
        Err(e) => handle_error(e),
    }
}

/// Create a user and its role profile
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = AccountResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 409, description = "Username or email already taken"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<NewUser>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.accounts.create_user(request).await {
        Ok(account) => created(AccountResponse::from(account)),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.accounts.get_user(id).await {
        Ok(user) => ok(UserResponse::from(user)),
        Err(e) => handle_error(e),
    }
}

/// Update contact and personal details
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UserContactUpdate,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid phone number"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<UserContactUpdate>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.accounts.update_contact(id, request).await {
        Ok(user) => ok(UserResponse::from(user)),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.accounts.delete_user(id).await {
        Ok(()) => no_content(),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/active",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Active flag updated", body = UserResponse),
        (status = 404, description = "User not found"),
    )
)]
pub async fn set_user_active(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<SetActiveRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state.accounts.set_active(id, request.is_active).await {
        Ok(user) => ok(UserResponse::from(user)),
        Err(e) => handle_error(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/profile",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Role profile", body = crate::models::Profile),
        (status = 404, description = "User or profile not found"),
    )
)]
pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.accounts.profile_for(id).await {
        Ok(profile) => ok(profile),
        Err(e) => handle_error(e),
    }
}

/// Mark a faculty member as chairperson
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}/chairperson",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = SetChairpersonRequest,
    responses(
        (status = 200, description = "Faculty profile updated", body = crate::models::Profile),
        (status = 400, description = "User is not faculty"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn set_user_chairperson(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
    JsonBody(request): JsonBody<SetChairpersonRequest>,
) -> Response {
    log_request(&method, &uri, &context);

    match state
        .accounts
        .set_chairperson(id, request.is_chairperson)
        .await
    {
        Ok(profile) => ok(profile),
        Err(e) => handle_error(e),
    }
}

/// Semester grades recorded for a student
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/semester-grades",
    tag = "grading",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Semester grades, empty for non-students"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn list_user_semester_grades(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    method: Method,
    uri: Uri,
    context: RequestContext,
) -> Response {
    log_request(&method, &uri, &context);

    match state.grading.list_semester_grades(id).await {
        Ok(grades) => ok(grades),
        Err(e) => handle_error(e),
    }
}
