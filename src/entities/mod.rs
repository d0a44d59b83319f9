//! SeaORM entity definitions
//!
//! One module per table. Relations mirror the foreign keys created by
//! [`crate::database::migrations`].

pub mod prelude;

pub mod faculty_profiles;
pub mod semester_final_grade_subject_grades;
pub mod semester_final_grades;
pub mod staff_profiles;
pub mod student_profiles;
pub mod subject_grades;
pub mod subject_instances;
pub mod subjects;
pub mod users;
