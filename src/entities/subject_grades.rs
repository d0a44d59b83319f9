use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Enrollment of a student in a subject instance, carrying the final grade
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub subject_instance_id: i32,
    pub final_grade: String,
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
    #[sea_orm(
        belongs_to = "super::subject_instances::Entity",
        from = "Column::SubjectInstanceId",
        to = "super::subject_instances::Column::Id",
        on_delete = "Cascade"
    )]
    SubjectInstance,
    #[sea_orm(has_many = "super::semester_final_grade_subject_grades::Entity")]
    SemesterLinks,
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subject_instances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectInstance.def()
    }
}

impl Related<super::semester_final_grade_subject_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SemesterLinks.def()
    }
}

impl Related<super::semester_final_grades::Entity> for Entity {
    fn to() -> RelationDef {
        super::semester_final_grade_subject_grades::Relation::SemesterFinalGrade.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::semester_final_grade_subject_grades::Relation::SubjectGrade.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
