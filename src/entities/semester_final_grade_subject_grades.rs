use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "semester_final_grade_subject_grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub semester_final_grade_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_grade_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::semester_final_grades::Entity",
        from = "Column::SemesterFinalGradeId",
        to = "super::semester_final_grades::Column::Id",
        on_delete = "Cascade"
    )]
    SemesterFinalGrade,
    #[sea_orm(
        belongs_to = "super::subject_grades::Entity",
        from = "Column::SubjectGradeId",
        to = "super::subject_grades::Column::Id",
        on_delete = "Cascade"
    )]
    SubjectGrade,
}

impl Related<super::semester_final_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SemesterFinalGrade.def()
    }
}

impl Related<super::subject_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectGrade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
