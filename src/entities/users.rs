use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub birth_date: Option<Date>,
    pub gender: Option<String>,
    pub address: String,
    pub photo: Option<String>,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_student: bool,
    pub is_faculty: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::student_profiles::Entity")]
    StudentProfile,
    #[sea_orm(has_one = "super::faculty_profiles::Entity")]
    FacultyProfile,
    #[sea_orm(has_one = "super::staff_profiles::Entity")]
    StaffProfile,
}

impl Related<super::student_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentProfile.def()
    }
}

impl Related<super::faculty_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FacultyProfile.def()
    }
}

impl Related<super::staff_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StaffProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
