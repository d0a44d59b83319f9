use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-semester aggregate of a student's subject grades
///
/// `grade` is derived from the linked subject grades and is rewritten every
/// time the GPA is computed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "semester_final_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub school_year: String,
    pub semester: String,
    pub grade: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_profiles::Entity",
        from = "Column::StudentId",
        to = "super::student_profiles::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(has_many = "super::semester_final_grade_subject_grades::Entity")]
    SubjectGradeLinks,
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::semester_final_grade_subject_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectGradeLinks.def()
    }
}

impl Related<super::subject_grades::Entity> for Entity {
    fn to() -> RelationDef {
        super::semester_final_grade_subject_grades::Relation::SubjectGrade.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::semester_final_grade_subject_grades::Relation::SemesterFinalGrade.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
