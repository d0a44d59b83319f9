//! SeaORM repositories for subjects and their per-semester offerings

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::{prelude::*, subject_instances, subjects};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{Subject, SubjectInstance};

/// SeaORM-based Subject repository
#[derive(Clone)]
pub struct SubjectSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SubjectSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(
        &self,
        subject_code: String,
        description: String,
        units: i32,
    ) -> RepositoryResult<Subject> {
        let model = subjects::ActiveModel {
            subject_code: Set(subject_code),
            description: Set(description),
            units: Set(units),
            ..Default::default()
        }
        .insert(&*self.connection)
        .await
        .map_err(RepositoryError::from_db)?;
        Ok(model.into())
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Subject>> {
        Ok(Subjects::find_by_id(id)
            .one(&*self.connection)
            .await?
            .map(Subject::from))
    }

    pub async fn list_all(&self) -> RepositoryResult<Vec<Subject>> {
        let models = Subjects::find()
            .order_by_asc(subjects::Column::SubjectCode)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(Subject::from).collect())
    }
}

/// SeaORM-based SubjectInstance repository
#[derive(Clone)]
pub struct SubjectInstanceSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SubjectInstanceSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    pub async fn create(
        &self,
        subject_id: i32,
        school_year: String,
        semester: String,
        instructor_id: Option<i32>,
    ) -> RepositoryResult<SubjectInstance> {
        let model = subject_instances::ActiveModel {
            subject_id: Set(subject_id),
            school_year: Set(school_year),
            semester: Set(semester),
            instructor_id: Set(instructor_id),
            ..Default::default()
        }
        .insert(&*self.connection)
        .await
        .map_err(RepositoryError::from_db)?;
        Ok(model.into())
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<SubjectInstance>> {
        Ok(SubjectInstances::find_by_id(id)
            .one(&*self.connection)
            .await?
            .map(SubjectInstance::from))
    }

    /// List offerings, optionally restricted to one subject
    pub async fn list(&self, subject_id: Option<i32>) -> RepositoryResult<Vec<SubjectInstance>> {
        let mut query = SubjectInstances::find();
        if let Some(subject_id) = subject_id {
            query = query.filter(subject_instances::Column::SubjectId.eq(subject_id));
        }
        let models = query
            .order_by_desc(subject_instances::Column::SchoolYear)
            .order_by_asc(subject_instances::Column::Semester)
            .order_by_asc(subject_instances::Column::Id)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(SubjectInstance::from).collect())
    }
}
