//! Web layer module
//!
//! The HTTP interface of the grading service. Handlers are thin: they log the
//! request, delegate to the account or grading service, and map the result
//! onto the standard response envelope.

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Config,
    database::Database,
    errors::AppResult,
    services::{AccountService, GradingService},
};

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod utils;

pub use extractors::{JsonBody, ListParams, PaginationParams, RequestContext, SearchParams};
pub use responses::{ApiResponse, PaginatedResponse, handle_error};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub accounts: Arc<AccountService>,
    pub grading: Arc<GradingService>,
}

impl AppState {
    pub fn new(config: Config, database: Database) -> AppResult<Self> {
        let accounts = AccountService::new(&database, &config.accounts)?;
        let grading = GradingService::new(&database, &config.grading)?;
        Ok(Self {
            database,
            accounts: Arc::new(accounts),
            grading: Arc::new(grading),
        })
    }
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, database: Database) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState::new(config, database)?;
        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on http://{}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(openapi_routes())
        .nest("/api/v1", api_v1_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn openapi_routes() -> Router<AppState> {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", openapi::get_openapi_spec()))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Accounts
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/users/{id}/active", put(handlers::users::set_user_active))
        .route("/users/{id}/profile", get(handlers::users::get_user_profile))
        .route(
            "/users/{id}/chairperson",
            put(handlers::users::set_user_chairperson),
        )
        .route(
            "/users/{id}/semester-grades",
            get(handlers::users::list_user_semester_grades),
        )
        // Subjects
        .route(
            "/subjects",
            get(handlers::subjects::list_subjects).post(handlers::subjects::create_subject),
        )
        .route("/subjects/{id}", get(handlers::subjects::get_subject))
        .route(
            "/subject-instances",
            get(handlers::subjects::list_subject_instances)
                .post(handlers::subjects::create_subject_instance),
        )
        // Grading
        .route(
            "/subject-instances/{id}/enrollments",
            post(handlers::grading::enroll),
        )
        .route(
            "/subject-instances/{id}/enrollments/{user_id}",
            get(handlers::grading::enrollment_status),
        )
        .route(
            "/subject-grades/{id}",
            put(handlers::grading::record_final_grade),
        )
        .route(
            "/semester-grades",
            post(handlers::grading::create_semester_grade),
        )
        .route(
            "/semester-grades/{id}",
            get(handlers::grading::get_semester_grade),
        )
        .route(
            "/semester-grades/{id}/gpa",
            post(handlers::grading::compute_gpa),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
