//! Centralized error handling for the grading service
//!
//! This module provides the error types shared by every layer of the
//! application so that repositories, services and HTTP handlers agree on
//! how failures are classified and reported.
//!
//! # Error Categories
//!
//! - **Database Errors**: SeaORM operations, migrations, connection issues
//! - **Repository Errors**: Data access layer failures
//! - **Validation Errors**: Input validation and business rule violations
//! - **Conflict Errors**: Uniqueness violations such as duplicate usernames
//!
//! # Usage
//!
//! ```rust
//! use grading_system::errors::{AppError, AppResult};
//!
//! fn require_units(units: i32) -> AppResult<i32> {
//!     if units <= 0 {
//!         return Err(AppError::validation("Subject units must be positive"));
//!     }
//!     Ok(units)
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
