//! Shared helpers

pub mod password;
pub mod validation;
