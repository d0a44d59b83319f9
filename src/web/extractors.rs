//! Request extractors and validation
//!
//! Query-string extractors reject malformed input with the standard error
//! envelope instead of axum's plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::Response,
};
use serde::{Deserialize, de::DeserializeOwned};
use utoipa::IntoParams;
use uuid::Uuid;

use super::responses::{ValidationErrorResponse, bad_request, validation_error};

pub const MAX_PAGE_SIZE: u32 = 1000;

/// Pagination parameters from query string
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), Vec<ValidationErrorResponse>> {
        let mut errors = Vec::new();

        if self.page < 1 {
            errors.push(ValidationErrorResponse {
                field: "page".to_string(),
                message: "Page must be >= 1".to_string(),
            });
        }

        if self.limit < 1 || self.limit > MAX_PAGE_SIZE {
            errors.push(ValidationErrorResponse {
                field: "limit".to_string(),
                message: format!("Limit must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<PaginationParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| bad_request("Invalid pagination parameters"))?;

        params.validate().map_err(validation_error)?;

        Ok(params)
    }
}

/// Free-text search from query string
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Matched against username, email, first and last name
    #[serde(default)]
    pub search: Option<String>,
}

impl<S> FromRequestParts<S> for SearchParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<SearchParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| bad_request("Invalid search parameters"))?;
        Ok(params)
    }
}

/// Combined pagination and search parameters
#[derive(Debug, Clone)]
pub struct ListParams {
    pub pagination: PaginationParams,
    pub search: SearchParams,
}

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pagination = PaginationParams::from_request_parts(parts, state).await?;
        let search = SearchParams::from_request_parts(parts, state).await?;
        Ok(Self { pagination, search })
    }
}

/// Subject instance filter
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubjectInstanceFilterParams {
    /// Only offerings of this subject
    #[serde(default)]
    pub subject_id: Option<i32>,
}

impl<S> FromRequestParts<S> for SubjectInstanceFilterParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<SubjectInstanceFilterParams> =
            Query::from_request_parts(parts, state)
                .await
                .map_err(|_| bad_request("Invalid filter parameters"))?;
        Ok(params)
    }
}

/// JSON request body whose rejections use the standard error envelope
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                bad_request(&format!("Invalid request body: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// Request context information
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub real_ip: Option<String>,
    pub request_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            user_agent: None,
            real_ip: None,
            request_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let real_ip = parts
            .headers
            .get("x-real-ip")
            .or_else(|| parts.headers.get("x-forwarded-for"))
            .and_then(|h| h.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_string());

        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            user_agent,
            real_ip,
            request_id,
            timestamp: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_bounds() {
        assert!(PaginationParams::default().validate().is_ok());
        assert!(PaginationParams { page: 0, limit: 10 }.validate().is_err());
        let errors = PaginationParams { page: 0, limit: 5000 }.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
