use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::subject_grades::Entity")]
    SubjectGrades,
    #[sea_orm(has_many = "super::semester_final_grades::Entity")]
    SemesterFinalGrades,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::subject_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectGrades.def()
    }
}

impl Related<super::semester_final_grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SemesterFinalGrades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
