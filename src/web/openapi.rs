//! OpenAPI documentation generation using utoipa
//!
//! Handler functions carry `#[utoipa::path]` annotations; this module gathers
//! them into one document served by Swagger UI at `/docs`.

use utoipa::OpenApi;

use crate::web::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grading System API",
        description = "
Student accounts, subject enrollment, final grades and semester GPA.

GPAs are unit-weighted means of numeric final grades. NSTP and PHED subjects
and non-numeric grades (P, W, D, NOT S, INC, blank) are left out.
        ",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    tags(
        (name = "users", description = "Accounts and role profiles"),
        (name = "subjects", description = "Subjects and their per-semester offerings"),
        (name = "grading", description = "Enrollment, final grades and semester GPA"),
        (name = "health", description = "Service health"),
    ),
    components(
        schemas(
            crate::models::AccountType,
            crate::models::Gender,
            crate::models::Profile,
            crate::models::ProfileKind,
            crate::models::User,
            crate::models::NewUser,
            crate::models::UserContactUpdate,
            crate::models::Semester,
            crate::models::Subject,
            crate::models::SubjectCreateRequest,
            crate::models::SubjectInstance,
            crate::models::SubjectInstanceCreateRequest,
            crate::models::SubjectGrade,
            crate::models::SemesterGrade,
            crate::models::SemesterGradeCreateRequest,
            handlers::users::UserResponse,
            handlers::users::AccountResponse,
            handlers::users::SetActiveRequest,
            handlers::users::SetChairpersonRequest,
            handlers::grading::EnrollmentRequest,
            handlers::grading::EnrollmentStatus,
            handlers::grading::FinalGradeRequest,
            handlers::grading::GpaResponse,
            crate::web::responses::HealthResponse,
        )
    ),
    paths(
        handlers::health::health_check,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::users::set_user_active,
        handlers::users::get_user_profile,
        handlers::users::set_user_chairperson,
        handlers::users::list_user_semester_grades,
        handlers::subjects::list_subjects,
        handlers::subjects::create_subject,
        handlers::subjects::get_subject,
        handlers::subjects::list_subject_instances,
        handlers::subjects::create_subject_instance,
        handlers::grading::enroll,
        handlers::grading::enrollment_status,
        handlers::grading::record_final_grade,
        handlers::grading::create_semester_grade,
        handlers::grading::get_semester_grade,
        handlers::grading::compute_gpa,
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with the crate version filled in
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_gpa_and_enrollment_paths() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key("/api/v1/semester-grades/{id}/gpa"));
        assert!(
            spec.paths
                .paths
                .contains_key("/api/v1/subject-instances/{id}/enrollments/{user_id}")
        );
        assert_eq!(spec.info.version, env!("CARGO_PKG_VERSION"));
    }
}
