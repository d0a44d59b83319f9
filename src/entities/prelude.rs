pub use super::faculty_profiles::Entity as FacultyProfiles;
pub use super::semester_final_grade_subject_grades::Entity as SemesterFinalGradeSubjectGrades;
pub use super::semester_final_grades::Entity as SemesterFinalGrades;
pub use super::staff_profiles::Entity as StaffProfiles;
pub use super::student_profiles::Entity as StudentProfiles;
pub use super::subject_grades::Entity as SubjectGrades;
pub use super::subject_instances::Entity as SubjectInstances;
pub use super::subjects::Entity as Subjects;
pub use super::users::Entity as Users;
