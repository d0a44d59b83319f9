//! Subject, enrollment and semester grade domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::entities::{semester_final_grades, subject_grades, subject_instances, subjects};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Semester {
    #[serde(rename = "1st")]
    #[strum(serialize = "1st")]
    First,
    #[serde(rename = "2nd")]
    #[strum(serialize = "2nd")]
    Second,
    #[serde(rename = "summer")]
    #[strum(serialize = "summer")]
    Summer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subject {
    pub id: i32,
    pub subject_code: String,
    pub description: String,
    pub units: i32,
}

impl From<subjects::Model> for Subject {
    fn from(m: subjects::Model) -> Self {
        Self {
            id: m.id,
            subject_code: m.subject_code,
            description: m.description,
            units: m.units,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubjectCreateRequest {
    pub subject_code: String,
    #[serde(default)]
    pub description: String,
    pub units: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubjectInstance {
    pub id: i32,
    pub subject_id: i32,
    pub school_year: String,
    pub semester: String,
    pub instructor_id: Option<i32>,
}

impl From<subject_instances::Model> for SubjectInstance {
    fn from(m: subject_instances::Model) -> Self {
        Self {
            id: m.id,
            subject_id: m.subject_id,
            school_year: m.school_year,
            semester: m.semester,
            instructor_id: m.instructor_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubjectInstanceCreateRequest {
    pub subject_id: i32,
    pub school_year: String,
    pub semester: Semester,
    /// User id of the faculty member teaching the offering
    #[serde(default)]
    pub instructor_user_id: Option<i32>,
}

/// A student's enrollment in a subject instance and the grade earned there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubjectGrade {
    pub id: i32,
    pub student_id: i32,
    pub subject_instance_id: i32,
    pub final_grade: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<subject_grades::Model> for SubjectGrade {
    fn from(m: subject_grades::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            subject_instance_id: m.subject_instance_id,
            final_grade: m.final_grade,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// One subject grade as seen by the GPA computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeEntry {
    pub subject_code: String,
    pub units: i32,
    pub final_grade: String,
}

impl GradeEntry {
    pub fn new(subject_code: impl Into<String>, units: i32, final_grade: impl Into<String>) -> Self {
        Self {
            subject_code: subject_code.into(),
            units,
            final_grade: final_grade.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SemesterGrade {
    pub id: i32,
    pub student_id: i32,
    pub school_year: String,
    pub semester: String,
    /// Last computed GPA, empty when nothing gradable was found
    pub grade: String,
    pub subject_grade_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SemesterGrade {
    pub fn from_model(m: semester_final_grades::Model, subject_grade_ids: Vec<i32>) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            school_year: m.school_year,
            semester: m.semester,
            grade: m.grade,
            subject_grade_ids,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SemesterGradeCreateRequest {
    pub user_id: i32,
    pub school_year: String,
    pub semester: Semester,
    #[serde(default)]
    pub subject_grade_ids: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_labels() {
        assert_eq!(Semester::First.to_string(), "1st");
        assert_eq!("SUMMER".parse::<Semester>().unwrap(), Semester::Summer);
        assert_eq!(
            serde_json::to_string(&Semester::Second).unwrap(),
            "\"2nd\""
        );
    }
}
