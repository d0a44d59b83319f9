//! Service layer for business logic
//!
//! Services sit between the web handlers and the repositories. They validate
//! input, enforce cross-table rules and convert repository errors into
//! [`crate::errors::AppError`].

pub mod account;
pub mod gpa;
pub mod grading;

pub use account::AccountService;
pub use gpa::GpaCalculator;
pub use grading::GradingService;
