//! Error type definitions for the grading service

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::utils::validation::ValidationError;

/// Top-level application error type
///
/// Services return this type; the web layer maps each variant onto an HTTP
/// status code in [`crate::web::responses::handle_error`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors (SeaORM)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Not found: {resource} with id {id}")]
    NotFound { resource: String, id: String },

    /// Uniqueness or state conflicts
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Constraint violations (unique, foreign key, etc.)
    #[error("Constraint violation: {constraint} - {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error for a resource and id
    pub fn not_found<R: Into<String>, I: ToString>(resource: R, id: I) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl RepositoryError {
    /// Classify a SeaORM error, lifting unique and foreign key violations
    /// into [`RepositoryError::ConstraintViolation`].
    pub fn from_db(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::ConstraintViolation {
                constraint: "unique".to_string(),
                message,
            },
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => Self::ConstraintViolation {
                constraint: "foreign_key".to_string(),
                message,
            },
            _ => Self::Database(err),
        }
    }

    pub fn not_found<T: Into<String>, F: Into<String>, V: ToString>(
        table: T,
        field: F,
        value: V,
    ) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RecordNotFound { table, value, .. } => Self::NotFound {
                resource: table,
                id: value,
            },
            RepositoryError::ConstraintViolation { constraint, message } if constraint == "unique" => {
                Self::Conflict { message }
            }
            other => Self::Repository(other),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            message: err.to_string(),
        }
    }
}
