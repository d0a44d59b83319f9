use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub subject_code: String,
    pub description: String,
    pub units: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subject_instances::Entity")]
    SubjectInstances,
}

impl Related<super::subject_instances::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectInstances.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
