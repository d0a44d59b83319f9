//! SeaORM profile repository
//!
//! Student, faculty and staff profiles are one-to-one extensions of a user.
//! [`provision_profile`] is the single place a profile row is created; the
//! user repository calls it inside the transaction that inserts the user.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{faculty_profiles, prelude::*, staff_profiles, student_profiles};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Profile, ProfileKind};

/// Insert the profile row matching `kind` for a freshly inserted user
pub async fn provision_profile<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    kind: ProfileKind,
) -> RepositoryResult<Profile> {
    let profile = match kind {
        ProfileKind::Student => {
            let m = student_profiles::ActiveModel {
                user_id: Set(user_id),
                ..Default::default()
            }
            .insert(db)
            .await
            .map_err(RepositoryError::from_db)?;
            Profile::Student {
                id: m.id,
                user_id: m.user_id,
            }
        }
        ProfileKind::Faculty => {
            let m = faculty_profiles::ActiveModel {
                user_id: Set(user_id),
                is_chairperson: Set(false),
                ..Default::default()
            }
            .insert(db)
            .await
            .map_err(RepositoryError::from_db)?;
            Profile::Faculty {
                id: m.id,
                user_id: m.user_id,
                is_chairperson: m.is_chairperson,
            }
        }
        ProfileKind::Staff => {
            let m = staff_profiles::ActiveModel {
                user_id: Set(user_id),
                ..Default::default()
            }
            .insert(db)
            .await
            .map_err(RepositoryError::from_db)?;
            Profile::Staff {
                id: m.id,
                user_id: m.user_id,
            }
        }
    };
    debug!("Provisioned {:?} profile {} for user {}", kind, profile.id(), user_id);
    Ok(profile)
}

/// SeaORM-based profile repository
#[derive(Clone)]
pub struct ProfileSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl ProfileSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Find whichever profile belongs to the user
    pub async fn find_for_user(&self, user_id: i32) -> RepositoryResult<Option<Profile>> {
        if let Some(id) = self.student_profile_id(user_id).await? {
            return Ok(Some(Profile::Student { id, user_id }));
        }
        if let Some(m) = self.faculty_profile(user_id).await? {
            return Ok(Some(Profile::Faculty {
                id: m.id,
                user_id,
                is_chairperson: m.is_chairperson,
            }));
        }
        let staff = StaffProfiles::find()
            .filter(staff_profiles::Column::UserId.eq(user_id))
            .one(&*self.connection)
            .await?;
        Ok(staff.map(|m| Profile::Staff { id: m.id, user_id }))
    }

    pub async fn student_profile_id(&self, user_id: i32) -> RepositoryResult<Option<i32>> {
        let model = StudentProfiles::find()
            .filter(student_profiles::Column::UserId.eq(user_id))
            .one(&*self.connection)
            .await?;
        Ok(model.map(|m| m.id))
    }

    pub async fn faculty_profile(
        &self,
        user_id: i32,
    ) -> RepositoryResult<Option<faculty_profiles::Model>> {
        Ok(FacultyProfiles::find()
            .filter(faculty_profiles::Column::UserId.eq(user_id))
            .one(&*self.connection)
            .await?)
    }

    /// Mark or unmark a faculty member as department chairperson
    pub async fn set_chairperson(&self, user_id: i32, value: bool) -> RepositoryResult<Profile> {
        let model = self
            .faculty_profile(user_id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("faculty_profiles", "user_id", user_id))?;

        let mut active: faculty_profiles::ActiveModel = model.into();
        active.is_chairperson = Set(value);
        let updated = active.update(&*self.connection).await?;

        Ok(Profile::Faculty {
            id: updated.id,
            user_id: updated.user_id,
            is_chairperson: updated.is_chairperson,
        })
    }
}
