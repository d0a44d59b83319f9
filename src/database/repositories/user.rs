//! SeaORM User repository implementation

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::info;

use super::profile::provision_profile;
use crate::entities::{prelude::*, users};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Profile, User, UserContactUpdate, UserCreateRequest};

/// SeaORM-based User repository
#[derive(Clone)]
pub struct UserSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl UserSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Insert a user and its role profile atomically
    ///
    /// Either both rows are written or neither is, so a persisted user always
    /// has exactly one profile.
    pub async fn create(&self, request: UserCreateRequest) -> RepositoryResult<(User, Profile)> {
        let now = Utc::now();
        let (is_student, is_faculty, is_staff, is_superuser) = request.account_type.flags();

        let txn = self.connection.begin().await?;

        let model = users::ActiveModel {
            username: Set(request.username),
            email: Set(request.email),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            middle_name: Set(request.middle_name),
            birth_date: Set(request.birth_date),
            gender: Set(Some(request.gender.unwrap_or_default().to_string())),
            address: Set(request.address),
            photo: Set(None),
            phone_number: Set(request.phone_number),
            password_hash: Set(request.password_hash),
            is_active: Set(request.is_active),
            is_student: Set(is_student),
            is_faculty: Set(is_faculty),
            is_staff: Set(is_staff),
            is_superuser: Set(is_superuser),
            date_joined: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::from_db)?;

        let profile =
            provision_profile(&txn, model.id, request.account_type.profile_kind()).await?;

        txn.commit().await?;

        info!(
            "Created user {} ({}) with {:?} profile",
            model.username,
            model.id,
            profile.kind()
        );
        Ok((model.into(), profile))
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        let model = Users::find_by_id(id).one(&*self.connection).await?;
        Ok(model.map(User::from))
    }

    pub async fn get(&self, id: i32) -> RepositoryResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("users", "id", id))
    }

    /// Look up a user together with the stored password hash
    pub async fn find_credentials(
        &self,
        username: &str,
    ) -> RepositoryResult<Option<(User, String)>> {
        let model = Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&*self.connection)
            .await?;
        Ok(model.map(|m| {
            let hash = m.password_hash.clone();
            (User::from(m), hash)
        }))
    }

    /// List users newest first, optionally filtered by a search term
    ///
    /// `page` is 1-based. Returns the page of users and the total match count.
    pub async fn list(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> RepositoryResult<(Vec<User>, u64)> {
        let mut query = Users::find();
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(users::Column::Username.contains(term))
                    .add(users::Column::Email.contains(term))
                    .add(users::Column::FirstName.contains(term))
                    .add(users::Column::LastName.contains(term)),
            );
        }

        let paginator = query
            .order_by_desc(users::Column::DateJoined)
            .order_by_desc(users::Column::Id)
            .paginate(&*self.connection, per_page.max(1));

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    /// Apply a contact update; `None` fields are left untouched
    pub async fn update_contact(&self, id: i32, update: UserContactUpdate) -> RepositoryResult<User> {
        let model = Users::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::not_found("users", "id", id))?;

        let mut active: users::ActiveModel = model.into();
        if let Some(middle_name) = update.middle_name {
            active.middle_name = Set(middle_name);
        }
        if let Some(birth_date) = update.birth_date {
            active.birth_date = Set(Some(birth_date));
        }
        if let Some(gender) = update.gender {
            active.gender = Set(Some(gender.to_string()));
        }
        if let Some(address) = update.address {
            active.address = Set(address);
        }
        if let Some(phone_number) = update.phone_number {
            active.phone_number = Set(phone_number);
        }
        if let Some(photo) = update.photo {
            active.photo = Set(Some(photo).filter(|p| !p.is_empty()));
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(&*self.connection)
            .await
            .map_err(RepositoryError::from_db)?;
        Ok(updated.into())
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> RepositoryResult<User> {
        let model = Users::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::not_found("users", "id", id))?;

        let mut active: users::ActiveModel = model.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&*self.connection).await?.into())
    }

    /// Delete a user; the profile rows go with it through the cascade
    pub async fn delete(&self, id: i32) -> RepositoryResult<()> {
        let result = Users::delete_by_id(id).exec(&*self.connection).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("users", "id", id));
        }
        Ok(())
    }
}
