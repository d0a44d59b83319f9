//! SeaORM repository implementations
//!
//! This module provides repository implementations using SeaORM that work across
//! SQLite, PostgreSQL, and MySQL databases.

pub mod profile;
pub mod semester_grade;
pub mod subject;
pub mod subject_grade;
pub mod user;

// Re-export for convenience
pub use profile::ProfileSeaOrmRepository;
pub use semester_grade::SemesterGradeSeaOrmRepository;
pub use subject::{SubjectInstanceSeaOrmRepository, SubjectSeaOrmRepository};
pub use subject_grade::SubjectGradeSeaOrmRepository;
pub use user::UserSeaOrmRepository;
