//! SeaORM SubjectGrade repository implementation
//!
//! A subject grade row doubles as the enrollment record: it exists from the
//! moment a student enrolls, with an empty final grade until one is recorded.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use crate::entities::{prelude::*, subject_grades};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::SubjectGrade;

/// SeaORM-based SubjectGrade repository
#[derive(Clone)]
pub struct SubjectGradeSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SubjectGradeSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Enroll a student profile in a subject instance
    pub async fn create(
        &self,
        student_id: i32,
        subject_instance_id: i32,
    ) -> RepositoryResult<SubjectGrade> {
        let now = Utc::now();
        let model = subject_grades::ActiveModel {
            student_id: Set(student_id),
            subject_instance_id: Set(subject_instance_id),
            final_grade: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&*self.connection)
        .await
        .map_err(RepositoryError::from_db)?;
        Ok(model.into())
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<SubjectGrade>> {
        Ok(SubjectGrades::find_by_id(id)
            .one(&*self.connection)
            .await?
            .map(SubjectGrade::from))
    }

    /// Whether an enrollment row exists for the pair
    pub async fn exists_for(
        &self,
        student_id: i32,
        subject_instance_id: i32,
    ) -> RepositoryResult<bool> {
        let count = SubjectGrades::find()
            .filter(subject_grades::Column::StudentId.eq(student_id))
            .filter(subject_grades::Column::SubjectInstanceId.eq(subject_instance_id))
            .count(&*self.connection)
            .await?;
        Ok(count > 0)
    }

    /// Fetch several grades at once, in id order
    pub async fn find_many(&self, ids: &[i32]) -> RepositoryResult<Vec<SubjectGrade>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = SubjectGrades::find()
            .filter(subject_grades::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(subject_grades::Column::Id)
            .all(&*self.connection)
            .await?;
        Ok(models.into_iter().map(SubjectGrade::from).collect())
    }

    pub async fn update_final_grade(&self, id: i32, final_grade: String) -> RepositoryResult<SubjectGrade> {
        let model = SubjectGrades::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::not_found("subject_grades", "id", id))?;

        let mut active: subject_grades::ActiveModel = model.into();
        active.final_grade = Set(final_grade);
        active.updated_at = Set(Utc::now());
        Ok(active.update(&*self.connection).await?.into())
    }
}
