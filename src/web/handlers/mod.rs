//! Web handlers module
//!
//! HTTP request handlers organized by domain. Each one logs the request,
//! calls a single service method and maps the result onto the response
//! envelope.

pub mod grading;
pub mod health;
pub mod subjects;
pub mod users;
