//! SeaORM SemesterFinalGrade repository implementation
//!
//! A semester grade links a set of subject grades through the
//! `semester_final_grade_subject_grades` table. The stored `grade` is a cache
//! of the last GPA computation over those links.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{
    prelude::*, semester_final_grade_subject_grades as links, semester_final_grades,
    subject_grades, subject_instances, subjects,
};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{GradeEntry, SemesterGrade};

#[derive(Debug, FromQueryResult)]
struct GradeEntryRow {
    final_grade: String,
    subject_code: String,
    units: i32,
}

/// SeaORM-based SemesterFinalGrade repository
#[derive(Clone)]
pub struct SemesterGradeSeaOrmRepository {
    connection: Arc<DatabaseConnection>,
}

impl SemesterGradeSeaOrmRepository {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    /// Create a semester grade and link its subject grades in one transaction
    pub async fn create(
        &self,
        student_id: i32,
        school_year: String,
        semester: String,
        subject_grade_ids: &[i32],
    ) -> RepositoryResult<SemesterGrade> {
        let now = Utc::now();
        let txn = self.connection.begin().await?;

        let model = semester_final_grades::ActiveModel {
            student_id: Set(student_id),
            school_year: Set(school_year),
            semester: Set(semester),
            grade: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(RepositoryError::from_db)?;

        let mut linked: Vec<i32> = subject_grade_ids.to_vec();
        linked.sort_unstable();
        linked.dedup();

        for subject_grade_id in &linked {
            SemesterFinalGradeSubjectGrades::insert(links::ActiveModel {
                semester_final_grade_id: Set(model.id),
                subject_grade_id: Set(*subject_grade_id),
            })
            .exec_without_returning(&txn)
            .await
            .map_err(RepositoryError::from_db)?;
        }

        txn.commit().await?;
        debug!(
            "Created semester grade {} linking {} subject grades",
            model.id,
            linked.len()
        );

        Ok(SemesterGrade::from_model(model, linked))
    }

    pub async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<SemesterGrade>> {
        let Some(model) = SemesterFinalGrades::find_by_id(id)
            .one(&*self.connection)
            .await?
        else {
            return Ok(None);
        };
        let ids = self.linked_subject_grade_ids(id).await?;
        Ok(Some(SemesterGrade::from_model(model, ids)))
    }

    pub async fn list_for_student(&self, student_id: i32) -> RepositoryResult<Vec<SemesterGrade>> {
        let models = SemesterFinalGrades::find()
            .filter(semester_final_grades::Column::StudentId.eq(student_id))
            .order_by_asc(semester_final_grades::Column::SchoolYear)
            .order_by_asc(semester_final_grades::Column::Semester)
            .all(&*self.connection)
            .await?;

        let mut result = Vec::with_capacity(models.len());
        for model in models {
            let ids = self.linked_subject_grade_ids(model.id).await?;
            result.push(SemesterGrade::from_model(model, ids));
        }
        Ok(result)
    }

    async fn linked_subject_grade_ids(&self, semester_grade_id: i32) -> RepositoryResult<Vec<i32>> {
        let rows = SemesterFinalGradeSubjectGrades::find()
            .filter(links::Column::SemesterFinalGradeId.eq(semester_grade_id))
            .order_by_asc(links::Column::SubjectGradeId)
            .all(&*self.connection)
            .await?;
        Ok(rows.into_iter().map(|r| r.subject_grade_id).collect())
    }

    /// Subject code, units and final grade of every linked subject grade
    pub async fn grade_entries(&self, semester_grade_id: i32) -> RepositoryResult<Vec<GradeEntry>> {
        let rows = SubjectGrades::find()
            .select_only()
            .column_as(subject_grades::Column::FinalGrade, "final_grade")
            .column_as(subjects::Column::SubjectCode, "subject_code")
            .column_as(subjects::Column::Units, "units")
            .join(JoinType::InnerJoin, subject_grades::Relation::SemesterLinks.def())
            .join(JoinType::InnerJoin, subject_grades::Relation::SubjectInstance.def())
            .join(JoinType::InnerJoin, subject_instances::Relation::Subject.def())
            .filter(links::Column::SemesterFinalGradeId.eq(semester_grade_id))
            .order_by_asc(subject_grades::Column::Id)
            .into_model::<GradeEntryRow>()
            .all(&*self.connection)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| GradeEntry {
                subject_code: r.subject_code,
                units: r.units,
                final_grade: r.final_grade,
            })
            .collect())
    }

    /// Overwrite the cached GPA
    pub async fn set_grade(&self, id: i32, grade: String) -> RepositoryResult<()> {
        let model = SemesterFinalGrades::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RepositoryError::not_found("semester_final_grades", "id", id))?;

        let mut active: semester_final_grades::ActiveModel = model.into();
        active.grade = Set(grade);
        active.updated_at = Set(Utc::now());
        active.update(&*self.connection).await?;
        Ok(())
    }
}
