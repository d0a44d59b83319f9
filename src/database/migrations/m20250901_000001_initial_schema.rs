use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tables in order of dependencies
        self.create_users_table(manager).await?;
        self.create_student_profiles_table(manager).await?;
        self.create_faculty_profiles_table(manager).await?;
        self.create_staff_profiles_table(manager).await?;
        self.create_subjects_table(manager).await?;
        self.create_subject_instances_table(manager).await?;
        self.create_subject_grades_table(manager).await?;
        self.create_semester_final_grades_table(manager).await?;
        self.create_semester_final_grade_subject_grades_table(manager)
            .await?;

        self.create_indexes(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(
                Table::drop()
                    .table(SemesterFinalGradeSubjectGrades::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(SemesterFinalGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectInstances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FacultyProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

impl Migration {
    fn create_id_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.integer().not_null().auto_increment().primary_key();
        col
    }

    fn create_timestamp_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.timestamp_with_time_zone().not_null();
        col
    }

    async fn create_users_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Users::Id))
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(25)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string_len(255).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::MiddleName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::BirthDate).date())
                    .col(
                        ColumnDef::new(Users::Gender)
                            .string_len(25)
                            .default("male"),
                    )
                    .col(
                        ColumnDef::new(Users::Address)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::Photo).string_len(255))
                    .col(
                        ColumnDef::new(Users::PhoneNumber)
                            .string_len(20)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::IsStudent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsFaculty)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsStaff)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::IsSuperuser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(self.create_timestamp_column(Users::DateJoined))
                    .col(self.create_timestamp_column(Users::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn create_student_profiles_table(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(self.create_id_column(StudentProfiles::Id))
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_profiles_user_id")
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_faculty_profiles_table(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FacultyProfiles::Table)
                    .if_not_exists()
                    .col(self.create_id_column(FacultyProfiles::Id))
                    .col(
                        ColumnDef::new(FacultyProfiles::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(FacultyProfiles::IsChairperson)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faculty_profiles_user_id")
                            .from(FacultyProfiles::Table, FacultyProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_staff_profiles_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaffProfiles::Table)
                    .if_not_exists()
                    .col(self.create_id_column(StaffProfiles::Id))
                    .col(
                        ColumnDef::new(StaffProfiles::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staff_profiles_user_id")
                            .from(StaffProfiles::Table, StaffProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_subjects_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Subjects::Id))
                    .col(
                        ColumnDef::new(Subjects::SubjectCode)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Description)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Subjects::Units).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn create_subject_instances_table(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubjectInstances::Table)
                    .if_not_exists()
                    .col(self.create_id_column(SubjectInstances::Id))
                    .col(
                        ColumnDef::new(SubjectInstances::SubjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectInstances::SchoolYear)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectInstances::Semester)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SubjectInstances::InstructorId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_instances_subject_id")
                            .from(SubjectInstances::Table, SubjectInstances::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_instances_instructor_id")
                            .from(SubjectInstances::Table, SubjectInstances::InstructorId)
                            .to(FacultyProfiles::Table, FacultyProfiles::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_subject_grades_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubjectGrades::Table)
                    .if_not_exists()
                    .col(self.create_id_column(SubjectGrades::Id))
                    .col(ColumnDef::new(SubjectGrades::StudentId).integer().not_null())
                    .col(
                        ColumnDef::new(SubjectGrades::SubjectInstanceId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubjectGrades::FinalGrade)
                            .string_len(10)
                            .not_null()
                            .default(""),
                    )
                    .col(self.create_timestamp_column(SubjectGrades::CreatedAt))
                    .col(self.create_timestamp_column(SubjectGrades::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_grades_student_id")
                            .from(SubjectGrades::Table, SubjectGrades::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_grades_subject_instance_id")
                            .from(SubjectGrades::Table, SubjectGrades::SubjectInstanceId)
                            .to(SubjectInstances::Table, SubjectInstances::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_semester_final_grades_table(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SemesterFinalGrades::Table)
                    .if_not_exists()
                    .col(self.create_id_column(SemesterFinalGrades::Id))
                    .col(
                        ColumnDef::new(SemesterFinalGrades::StudentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SemesterFinalGrades::SchoolYear)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SemesterFinalGrades::Semester)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SemesterFinalGrades::Grade)
                            .string_len(10)
                            .not_null()
                            .default(""),
                    )
                    .col(self.create_timestamp_column(SemesterFinalGrades::CreatedAt))
                    .col(self.create_timestamp_column(SemesterFinalGrades::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_semester_final_grades_student_id")
                            .from(SemesterFinalGrades::Table, SemesterFinalGrades::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_semester_final_grade_subject_grades_table(
        &self,
        manager: &SchemaManager<'_>,
    ) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SemesterFinalGradeSubjectGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SemesterFinalGradeSubjectGrades::SemesterFinalGradeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SemesterFinalGradeSubjectGrades::SubjectGradeId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(SemesterFinalGradeSubjectGrades::SemesterFinalGradeId)
                            .col(SemesterFinalGradeSubjectGrades::SubjectGradeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sfg_subject_grades_semester_final_grade_id")
                            .from(
                                SemesterFinalGradeSubjectGrades::Table,
                                SemesterFinalGradeSubjectGrades::SemesterFinalGradeId,
                            )
                            .to(SemesterFinalGrades::Table, SemesterFinalGrades::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sfg_subject_grades_subject_grade_id")
                            .from(
                                SemesterFinalGradeSubjectGrades::Table,
                                SemesterFinalGradeSubjectGrades::SubjectGradeId,
                            )
                            .to(SubjectGrades::Table, SubjectGrades::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        // One enrollment per student per offering
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_grades_student_instance")
                    .table(SubjectGrades::Table)
                    .col(SubjectGrades::StudentId)
                    .col(SubjectGrades::SubjectInstanceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_subject_instances_subject_id")
                    .table(SubjectInstances::Table)
                    .col(SubjectInstances::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_semester_final_grades_student_id")
                    .table(SemesterFinalGrades::Table)
                    .col(SemesterFinalGrades::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_date_joined")
                    .table(Users::Table)
                    .col(Users::DateJoined)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    MiddleName,
    BirthDate,
    Gender,
    Address,
    Photo,
    PhoneNumber,
    PasswordHash,
    IsActive,
    IsStudent,
    IsFaculty,
    IsStaff,
    IsSuperuser,
    DateJoined,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
}

#[derive(DeriveIden)]
enum FacultyProfiles {
    Table,
    Id,
    UserId,
    IsChairperson,
}

#[derive(DeriveIden)]
enum StaffProfiles {
    Table,
    Id,
    UserId,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    SubjectCode,
    Description,
    Units,
}

#[derive(DeriveIden)]
enum SubjectInstances {
    Table,
    Id,
    SubjectId,
    SchoolYear,
    Semester,
    InstructorId,
}

#[derive(DeriveIden)]
enum SubjectGrades {
    Table,
    Id,
    StudentId,
    SubjectInstanceId,
    FinalGrade,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SemesterFinalGrades {
    Table,
    Id,
    StudentId,
    SchoolYear,
    Semester,
    Grade,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SemesterFinalGradeSubjectGrades {
    Table,
    SemesterFinalGradeId,
    SubjectGradeId,
}
