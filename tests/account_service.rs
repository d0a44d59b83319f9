//! Account service integration tests
//!
//! Exercise account creation, profile provisioning and maintenance against a
//! migrated in-memory SQLite database.

use rstest::rstest;
use sea_orm::EntityTrait;

use grading_system::{
    config::AccountsConfig,
    database::Database,
    entities::prelude::StudentProfiles,
    errors::AppError,
    models::{AccountType, Gender, NewUser, ProfileKind, UserContactUpdate},
    services::AccountService,
};

async fn create_test_service() -> AccountService {
    let database = Database::new_in_memory()
        .await
        .expect("Failed to create test database");
    let config = AccountsConfig {
        password_hash_iterations: 10,
        ..AccountsConfig::default()
    };
    AccountService::new(&database, &config).expect("Failed to create account service")
}

fn new_user(username: &str, account_type: AccountType) -> NewUser {
    NewUser {
        username: Some(username.to_string()),
        email: Some(format!("{username}@example.edu")),
        password: Some("correct horse".to_string()),
        first_name: Some("maria".to_string()),
        last_name: Some("santos".to_string()),
        account_type: Some(account_type),
        is_active: true,
        ..Default::default()
    }
}

#[rstest]
#[case(AccountType::Student, ProfileKind::Student, "Student")]
#[case(AccountType::Faculty, ProfileKind::Faculty, "Faculty")]
#[case(AccountType::Staff, ProfileKind::Staff, "Staff")]
#[case(AccountType::Administrator, ProfileKind::Staff, "Administrator")]
#[tokio::test]
async fn test_each_account_type_gets_one_matching_profile(
    #[case] account_type: AccountType,
    #[case] expected_kind: ProfileKind,
    #[case] expected_label: &str,
) {
    let service = create_test_service().await;

    let account = service
        .create_user(new_user("msantos", account_type))
        .await
        .unwrap();

    assert_eq!(account.profile.kind(), expected_kind);
    assert_eq!(account.user.account_type_label(), expected_label);
    assert_eq!(account.user.first_name, "Maria");
    assert_eq!(account.user.last_name, "Santos");

    let profile = service.profile_for(account.user.id).await.unwrap();
    assert_eq!(profile, account.profile);
}

#[tokio::test]
async fn test_gender_defaults_to_male() {
    let service = create_test_service().await;

    let account = service
        .create_user(new_user("nogender", AccountType::Student))
        .await
        .unwrap();
    assert_eq!(account.user.gender, Some(Gender::Male));

    let stored = service.get_user(account.user.id).await.unwrap();
    assert_eq!(stored.gender, Some(Gender::Male));

    let mut user = new_user("withgender", AccountType::Faculty);
    user.gender = Some(Gender::Female);
    let account = service.create_user(user).await.unwrap();
    assert_eq!(account.user.gender, Some(Gender::Female));
}

#[tokio::test]
async fn test_missing_fields_report_first_problem() {
    let service = create_test_service().await;

    let mut user = new_user("nobody", AccountType::Student);
    user.email = None;
    user.username = None;
    match service.create_user(user).await {
        Err(AppError::Validation { message }) => {
            assert_eq!(message, "Users must have an email address!")
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let mut user = new_user("nobody", AccountType::Student);
    user.account_type = None;
    match service.create_user(user).await {
        Err(AppError::Validation { message }) => {
            assert_eq!(message, "Users must have account type!")
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let (users, total) = service.list_users(1, 50, None).await.unwrap();
    assert!(users.is_empty());
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_duplicate_username_is_a_conflict() {
    let service = create_test_service().await;

    service
        .create_user(new_user("dupe", AccountType::Student))
        .await
        .unwrap();

    let mut second = new_user("dupe", AccountType::Faculty);
    second.email = Some("other@example.edu".to_string());
    let err = service.create_user(second).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }), "got {err:?}");

    // The failed insert leaves no orphaned profile behind
    let (users, total) = service.list_users(1, 50, None).await.unwrap();
    assert_eq!(total, 1);
    assert!(users[0].is_student);
}

#[tokio::test]
async fn test_staff_and_superuser_helpers() {
    let service = create_test_service().await;

    let staff = service
        .create_staff_user("registrar", "registrar@example.edu", "ana", "reyes", "pw")
        .await
        .unwrap();
    assert!(staff.user.is_staff);
    assert!(!staff.user.is_superuser);
    assert_eq!(staff.profile.kind(), ProfileKind::Staff);

    let admin = service
        .create_superuser("root", "root@example.edu", "jose", "rizal", "pw")
        .await
        .unwrap();
    assert!(admin.user.is_staff);
    assert!(admin.user.is_superuser);
    assert_eq!(admin.user.to_string(), "Jose Rizal (Administrator)");
}

#[tokio::test]
async fn test_update_contact_validates_phone() {
    let service = create_test_service().await;
    let account = service
        .create_user(new_user("contact", AccountType::Student))
        .await
        .unwrap();

    let updated = service
        .update_contact(
            account.user.id,
            UserContactUpdate {
                middle_name: Some("cruz".to_string()),
                phone_number: Some("+63-917-1234-567".to_string()),
                gender: Some(Gender::Female),
                address: Some(" Quezon City ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.middle_name, "Cruz");
    assert_eq!(updated.phone_number, "+63-917-1234-567");
    assert_eq!(updated.gender, Some(Gender::Female));
    assert_eq!(updated.address, "Quezon City");
    assert_eq!(updated.full_name(), "Maria Cruz Santos");

    let err = service
        .update_contact(
            account.user.id,
            UserContactUpdate {
                phone_number: Some("0917 123 4567".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = service
        .update_contact(9999, UserContactUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_chairperson_is_faculty_only() {
    let service = create_test_service().await;
    let faculty = service
        .create_user(new_user("prof", AccountType::Faculty))
        .await
        .unwrap();
    let student = service
        .create_user(new_user("stud", AccountType::Student))
        .await
        .unwrap();

    let profile = service.set_chairperson(faculty.user.id, true).await.unwrap();
    assert!(matches!(
        profile,
        grading_system::models::Profile::Faculty {
            is_chairperson: true,
            ..
        }
    ));

    let err = service
        .set_chairperson(student.user.id, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));

    let err = service.set_chairperson(4242, true).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_user_without_profile_is_an_internal_error() {
    let database = Database::new_in_memory()
        .await
        .expect("Failed to create test database");
    let config = AccountsConfig {
        password_hash_iterations: 10,
        ..AccountsConfig::default()
    };
    let service = AccountService::new(&database, &config).unwrap();
    let account = service
        .create_user(new_user("orphan", AccountType::Student))
        .await
        .unwrap();

    StudentProfiles::delete_many()
        .exec(&*database.connection)
        .await
        .unwrap();

    let err = service.profile_for(account.user.id).await.unwrap_err();
    assert!(matches!(err, AppError::Internal { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_verify_password_respects_active_flag() {
    let service = create_test_service().await;
    let account = service
        .create_user(new_user("login", AccountType::Student))
        .await
        .unwrap();

    assert!(service.verify_password("login", "correct horse").await.unwrap());
    assert!(!service.verify_password("login", "wrong").await.unwrap());
    assert!(!service.verify_password("ghost", "correct horse").await.unwrap());

    service.set_active(account.user.id, false).await.unwrap();
    assert!(!service.verify_password("login", "correct horse").await.unwrap());
}

#[tokio::test]
async fn test_list_users_newest_first_with_search() {
    let service = create_test_service().await;
    for name in ["alpha", "bravo", "charlie"] {
        service
            .create_user(new_user(name, AccountType::Student))
            .await
            .unwrap();
    }

    let (users, total) = service.list_users(1, 2, None).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "charlie");
    assert_eq!(users[1].username, "bravo");

    let (users, total) = service.list_users(1, 50, Some("brav")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(users[0].username, "bravo");
}

#[tokio::test]
async fn test_delete_user_removes_profile() {
    let service = create_test_service().await;
    let account = service
        .create_user(new_user("gone", AccountType::Faculty))
        .await
        .unwrap();

    service.delete_user(account.user.id).await.unwrap();

    assert!(matches!(
        service.get_user(account.user.id).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        service.profile_for(account.user.id).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete_user(account.user.id).await,
        Err(AppError::NotFound { .. })
    ));
}
