use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A subject offered in a given school year and semester
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject_instances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subject_id: i32,
    pub school_year: String,
    pub semester: String,
    pub instructor_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_delete = "Cascade"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::faculty_profiles::Entity",
        from = "Column::InstructorId",
        to = "super::faculty_profiles::Column::Id",
        on_delete = "SetNull"
    )]
    Instructor,
    #[sea_orm(has_many = "super::subject_grades::Entity")]
    SubjectGrades,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::faculty_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::subject_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectGrades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
