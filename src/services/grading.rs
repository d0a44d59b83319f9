//! Grading service
//!
//! Subjects, their per-semester offerings, enrollments, final grades and
//! semester GPA computation.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::GradingConfig;
use crate::database::Database;
use crate::database::repositories::{
    ProfileSeaOrmRepository, SemesterGradeSeaOrmRepository, SubjectGradeSeaOrmRepository,
    SubjectInstanceSeaOrmRepository, SubjectSeaOrmRepository, UserSeaOrmRepository,
};
use crate::errors::{AppError, AppResult};
use crate::models::{
    SemesterGrade, SemesterGradeCreateRequest, Subject, SubjectCreateRequest, SubjectGrade,
    SubjectInstance, SubjectInstanceCreateRequest,
};
use crate::services::gpa::GpaCalculator;

const MIN_NUMERIC_GRADE: f64 = 1.0;
const MAX_NUMERIC_GRADE: f64 = 5.0;

#[derive(Clone)]
pub struct GradingService {
    users: UserSeaOrmRepository,
    profiles: ProfileSeaOrmRepository,
    subjects: SubjectSeaOrmRepository,
    instances: SubjectInstanceSeaOrmRepository,
    subject_grades: SubjectGradeSeaOrmRepository,
    semester_grades: SemesterGradeSeaOrmRepository,
    calculator: Arc<GpaCalculator>,
}

impl GradingService {
    pub fn new(database: &Database, config: &GradingConfig) -> AppResult<Self> {
        let connection = database.connection().clone();
        Ok(Self {
            users: UserSeaOrmRepository::new(connection.clone()),
            profiles: ProfileSeaOrmRepository::new(connection.clone()),
            subjects: SubjectSeaOrmRepository::new(connection.clone()),
            instances: SubjectInstanceSeaOrmRepository::new(connection.clone()),
            subject_grades: SubjectGradeSeaOrmRepository::new(connection.clone()),
            semester_grades: SemesterGradeSeaOrmRepository::new(connection),
            calculator: Arc::new(GpaCalculator::new(config)?),
        })
    }

    /// Recompute and store the GPA of a semester grade
    ///
    /// The stored value is overwritten even when the result is empty.
    pub async fn compute_gpa(&self, semester_grade_id: i32) -> AppResult<String> {
        if self.semester_grades.find_by_id(semester_grade_id).await?.is_none() {
            return Err(AppError::not_found("semester_final_grades", semester_grade_id));
        }

        let entries = self.semester_grades.grade_entries(semester_grade_id).await?;
        let gpa = self.calculator.compute(&entries);
        self.semester_grades
            .set_grade(semester_grade_id, gpa.clone())
            .await?;

        info!(
            "Computed GPA for semester grade {} over {} subject grades: '{}'",
            semester_grade_id,
            entries.len(),
            gpa
        );
        Ok(gpa)
    }

    /// Whether the user's student profile holds a grade for the instance
    ///
    /// Users without a student profile are never enrolled.
    pub async fn is_already_enrolled(
        &self,
        user_id: i32,
        subject_instance_id: i32,
    ) -> AppResult<bool> {
        self.users.get(user_id).await?;
        self.require_instance(subject_instance_id).await?;

        let Some(student_id) = self.profiles.student_profile_id(user_id).await? else {
            debug!("User {} has no student profile", user_id);
            return Ok(false);
        };
        Ok(self
            .subject_grades
            .exists_for(student_id, subject_instance_id)
            .await?)
    }

    pub async fn create_subject(&self, request: SubjectCreateRequest) -> AppResult<Subject> {
        let code = request.subject_code.trim();
        if code.is_empty() {
            return Err(AppError::validation("Subjects must have a subject code!"));
        }
        if request.units <= 0 {
            return Err(AppError::validation("Subject units must be positive"));
        }

        let subject = self
            .subjects
            .create(
                code.to_string(),
                request.description.trim().to_string(),
                request.units,
            )
            .await?;
        info!("Created subject {} ({})", subject.subject_code, subject.id);
        Ok(subject)
    }

    pub async fn list_subjects(&self) -> AppResult<Vec<Subject>> {
        Ok(self.subjects.list_all().await?)
    }

    pub async fn get_subject(&self, id: i32) -> AppResult<Subject> {
        self.subjects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("subjects", id))
    }

    /// Offer a subject for a school year and semester
    ///
    /// The instructor is given as a user id and must belong to a faculty member.
    pub async fn create_subject_instance(
        &self,
        request: SubjectInstanceCreateRequest,
    ) -> AppResult<SubjectInstance> {
        self.get_subject(request.subject_id).await?;

        let school_year = request.school_year.trim();
        if !is_school_year(school_year) {
            return Err(AppError::validation(
                "School year must look like 2024-2025",
            ));
        }

        let instructor_id = match request.instructor_user_id {
            Some(user_id) => {
                self.users.get(user_id).await?;
                let faculty = self.profiles.faculty_profile(user_id).await?.ok_or_else(|| {
                    AppError::validation("Instructors must be faculty accounts")
                })?;
                Some(faculty.id)
            }
            None => None,
        };

        let instance = self
            .instances
            .create(
                request.subject_id,
                school_year.to_string(),
                request.semester.to_string(),
                instructor_id,
            )
            .await?;
        info!(
            "Created subject instance {} for subject {} ({} {})",
            instance.id, instance.subject_id, instance.school_year, instance.semester
        );
        Ok(instance)
    }

    pub async fn list_subject_instances(
        &self,
        subject_id: Option<i32>,
    ) -> AppResult<Vec<SubjectInstance>> {
        Ok(self.instances.list(subject_id).await?)
    }

    /// Enroll a student in a subject instance, creating an ungraded subject grade
    pub async fn enroll(&self, user_id: i32, subject_instance_id: i32) -> AppResult<SubjectGrade> {
        self.users.get(user_id).await?;
        self.require_instance(subject_instance_id).await?;

        let student_id = self
            .profiles
            .student_profile_id(user_id)
            .await?
            .ok_or_else(|| AppError::validation("Only student accounts can enroll"))?;

        if self
            .subject_grades
            .exists_for(student_id, subject_instance_id)
            .await?
        {
            warn!(
                "User {} is already enrolled in subject instance {}",
                user_id, subject_instance_id
            );
            return Err(AppError::conflict(format!(
                "User {user_id} is already enrolled in subject instance {subject_instance_id}"
            )));
        }

        let grade = self
            .subject_grades
            .create(student_id, subject_instance_id)
            .await?;
        info!(
            "Enrolled user {} in subject instance {} (subject grade {})",
            user_id, subject_instance_id, grade.id
        );
        Ok(grade)
    }

    /// Record a final grade: a non-gradable marker or a number from 1.0 to 5.0
    pub async fn record_final_grade(
        &self,
        subject_grade_id: i32,
        final_grade: &str,
    ) -> AppResult<SubjectGrade> {
        let final_grade = self.normalize_final_grade(final_grade)?;
        let grade = self
            .subject_grades
            .update_final_grade(subject_grade_id, final_grade)
            .await?;
        info!(
            "Recorded final grade '{}' for subject grade {}",
            grade.final_grade, grade.id
        );
        Ok(grade)
    }

    fn normalize_final_grade(&self, final_grade: &str) -> AppResult<String> {
        let trimmed = final_grade.trim();
        let marker = trimmed.to_uppercase();
        if self.calculator.is_non_gradable_mark(&marker) {
            return Ok(marker);
        }
        match self.calculator.numeric_grade(trimmed) {
            Some(value) if (MIN_NUMERIC_GRADE..=MAX_NUMERIC_GRADE).contains(&value) => {
                Ok(trimmed.to_string())
            }
            _ => Err(AppError::validation(format!(
                "Final grade '{trimmed}' must be a grade marker or a number from 1.0 to 5.0"
            ))),
        }
    }

    /// Group a student's subject grades into a semester grade
    pub async fn create_semester_grade(
        &self,
        request: SemesterGradeCreateRequest,
    ) -> AppResult<SemesterGrade> {
        self.users.get(request.user_id).await?;
        let student_id = self
            .profiles
            .student_profile_id(request.user_id)
            .await?
            .ok_or_else(|| AppError::validation("Semester grades belong to student accounts"))?;

        let school_year = request.school_year.trim();
        if !is_school_year(school_year) {
            return Err(AppError::validation(
                "School year must look like 2024-2025",
            ));
        }

        let found = self
            .subject_grades
            .find_many(&request.subject_grade_ids)
            .await?;
        if let Some(missing) = request
            .subject_grade_ids
            .iter()
            .find(|id| !found.iter().any(|g| g.id == **id))
        {
            return Err(AppError::not_found("subject_grades", missing));
        }
        if let Some(foreign) = found.iter().find(|g| g.student_id != student_id) {
            return Err(AppError::validation(format!(
                "Subject grade {} does not belong to user {}",
                foreign.id, request.user_id
            )));
        }

        let semester_grade = self
            .semester_grades
            .create(
                student_id,
                school_year.to_string(),
                request.semester.to_string(),
                &request.subject_grade_ids,
            )
            .await?;
        info!(
            "Created semester grade {} for user {} ({} {})",
            semester_grade.id, request.user_id, semester_grade.school_year, semester_grade.semester
        );
        Ok(semester_grade)
    }

    pub async fn get_semester_grade(&self, id: i32) -> AppResult<SemesterGrade> {
        self.semester_grades
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("semester_final_grades", id))
    }

    /// Semester grades of a user; empty for accounts that are not students
    pub async fn list_semester_grades(&self, user_id: i32) -> AppResult<Vec<SemesterGrade>> {
        self.users.get(user_id).await?;
        match self.profiles.student_profile_id(user_id).await? {
            Some(student_id) => Ok(self.semester_grades.list_for_student(student_id).await?),
            None => Ok(Vec::new()),
        }
    }

    async fn require_instance(&self, id: i32) -> AppResult<SubjectInstance> {
        self.instances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("subject_instances", id))
    }
}

/// `YYYY-YYYY` with consecutive years
fn is_school_year(value: &str) -> bool {
    let Some((start, end)) = value.split_once('-') else {
        return false;
    };
    let is_year = |s: &str| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit());
    if !is_year(start) || !is_year(end) {
        return false;
    }
    match (start.parse::<u32>(), end.parse::<u32>()) {
        (Ok(start), Ok(end)) => end == start + 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn school_years_are_consecutive() {
        assert!(is_school_year("2024-2025"));
        assert!(!is_school_year("2024-2026"));
        assert!(!is_school_year("24-25"));
        assert!(!is_school_year("2024/2025"));
        assert!(!is_school_year("+202-+203"));
    }
}
