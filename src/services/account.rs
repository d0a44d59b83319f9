//! Account service
//!
//! Creation, lookup and maintenance of user accounts and their role profiles.

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::AccountsConfig;
use crate::database::Database;
use crate::database::repositories::{ProfileSeaOrmRepository, UserSeaOrmRepository};
use crate::errors::{AppError, AppResult};
use crate::models::{Account, AccountType, NewUser, Profile, User, UserContactUpdate, UserCreateRequest};
use crate::utils::password;
use crate::utils::validation::{
    non_blank, normalize_email, title_case, validate_email, validate_max_length,
    validate_phone_number,
};

/// Service for managing user accounts
#[derive(Clone)]
pub struct AccountService {
    users: UserSeaOrmRepository,
    profiles: ProfileSeaOrmRepository,
    config: AccountsConfig,
    phone_pattern: Regex,
}

impl AccountService {
    pub fn new(database: &Database, config: &AccountsConfig) -> AppResult<Self> {
        let phone_pattern = Regex::new(&config.phone_pattern)
            .map_err(|e| AppError::configuration(format!("Invalid phone_pattern: {e}")))?;
        Ok(Self {
            users: UserSeaOrmRepository::new(database.connection().clone()),
            profiles: ProfileSeaOrmRepository::new(database.connection().clone()),
            config: config.clone(),
            phone_pattern,
        })
    }

    /// Create an account and its role profile
    pub async fn create_user(&self, new_user: NewUser) -> AppResult<Account> {
        let request = prepare_new_user(new_user, &self.config, &self.phone_pattern)?;
        debug!(
            "Creating {} account for username '{}'",
            request.account_type, request.username
        );
        let (user, profile) = self.users.create(request).await?;
        Ok(Account { user, profile })
    }

    pub async fn create_staff_user(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> AppResult<Account> {
        self.create_user(fixed_role_user(
            AccountType::Staff,
            username,
            email,
            first_name,
            last_name,
            password,
        ))
        .await
    }

    /// Administrators are staff with the superuser flag set
    pub async fn create_superuser(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> AppResult<Account> {
        self.create_user(fixed_role_user(
            AccountType::Administrator,
            username,
            email,
            first_name,
            last_name,
            password,
        ))
        .await
    }

    pub async fn get_user(&self, id: i32) -> AppResult<User> {
        Ok(self.users.get(id).await?)
    }

    /// Newest accounts first; `page` is 1-based
    pub async fn list_users(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> AppResult<(Vec<User>, u64)> {
        Ok(self.users.list(page, per_page, search).await?)
    }

    pub async fn update_contact(&self, id: i32, mut update: UserContactUpdate) -> AppResult<User> {
        if let Some(phone) = update.phone_number.as_mut() {
            *phone = phone.trim().to_string();
            validate_phone_number(phone, &self.phone_pattern)?;
        }
        if let Some(middle_name) = update.middle_name.as_mut() {
            *middle_name = title_case(middle_name.trim());
        }
        if let Some(address) = update.address.as_mut() {
            *address = address.trim().to_string();
        }

        let user = self.users.update_contact(id, update).await?;
        info!("Updated contact details for user {}", user.id);
        Ok(user)
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> AppResult<User> {
        let user = self.users.set_active(id, is_active).await?;
        info!("User {} is_active set to {}", id, is_active);
        Ok(user)
    }

    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.users.delete(id).await?;
        info!("Deleted user {}", id);
        Ok(())
    }

    pub async fn profile_for(&self, user_id: i32) -> AppResult<Profile> {
        self.users.get(user_id).await?;
        self.profiles
            .find_for_user(user_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("User {user_id} has no profile")))
    }

    /// Only faculty members can be chairpersons
    pub async fn set_chairperson(&self, user_id: i32, is_chairperson: bool) -> AppResult<Profile> {
        let user = self.users.get(user_id).await?;
        if !user.is_faculty {
            warn!("Rejected chairperson change for non-faculty user {}", user_id);
            return Err(AppError::validation(
                "Only faculty accounts can be chairpersons",
            ));
        }
        let profile = self.profiles.set_chairperson(user_id, is_chairperson).await?;
        info!("User {} chairperson set to {}", user_id, is_chairperson);
        Ok(profile)
    }

    /// Check a username and password; inactive or unknown accounts never match
    pub async fn verify_password(&self, username: &str, password: &str) -> AppResult<bool> {
        let Some((user, hash)) = self.users.find_credentials(username.trim()).await? else {
            return Ok(false);
        };
        if !user.is_active {
            debug!("Password check for inactive user {}", user.id);
            return Ok(false);
        }
        Ok(password::verify_password(password, &hash))
    }
}

fn fixed_role_user(
    account_type: AccountType,
    username: &str,
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
) -> NewUser {
    NewUser {
        username: Some(username.to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        first_name: Some(first_name.to_string()),
        last_name: Some(last_name.to_string()),
        account_type: Some(account_type),
        is_active: true,
        ..Default::default()
    }
}

/// Validate and normalise account input
///
/// Required fields are checked in a fixed order and the first missing one is
/// reported. Blank strings count as missing.
pub fn prepare_new_user(
    new_user: NewUser,
    config: &AccountsConfig,
    phone_pattern: &Regex,
) -> AppResult<UserCreateRequest> {
    let email = non_blank(new_user.email.as_deref())
        .ok_or_else(|| AppError::validation("Users must have an email address!"))?;
    let username = non_blank(new_user.username.as_deref())
        .ok_or_else(|| AppError::validation("Users must have username!"))?;
    let password = new_user
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Users must have a password!"))?;
    let first_name = non_blank(new_user.first_name.as_deref())
        .ok_or_else(|| AppError::validation("Users must have a first name!"))?;
    let last_name = non_blank(new_user.last_name.as_deref())
        .ok_or_else(|| AppError::validation("Users must have a last name!"))?;
    let account_type = new_user
        .account_type
        .ok_or_else(|| AppError::validation("Users must have account type!"))?;

    validate_max_length("username", username, config.username_max_length)?;
    let email = normalize_email(email);
    validate_email(&email)?;
    let phone_number = new_user
        .phone_number
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    validate_phone_number(&phone_number, phone_pattern)?;

    Ok(UserCreateRequest {
        username: username.to_string(),
        email,
        password_hash: password::hash_password(password, config.password_hash_iterations),
        first_name: title_case(first_name),
        last_name: title_case(last_name),
        middle_name: non_blank(new_user.middle_name.as_deref())
            .map(title_case)
            .unwrap_or_default(),
        account_type,
        birth_date: new_user.birth_date,
        gender: new_user.gender,
        address: non_blank(new_user.address.as_deref())
            .unwrap_or_default()
            .to_string(),
        phone_number,
        is_active: new_user.is_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config() -> AccountsConfig {
        AccountsConfig {
            password_hash_iterations: 10,
            ..AccountsConfig::default()
        }
    }

    fn phone_pattern() -> Regex {
        Regex::new(&AccountsConfig::default().phone_pattern).unwrap()
    }

    fn complete() -> NewUser {
        NewUser {
            username: Some("jdelacruz".to_string()),
            email: Some("juan@Example.EDU".to_string()),
            password: Some("s3cret".to_string()),
            first_name: Some("juan".to_string()),
            last_name: Some("dela cruz".to_string()),
            account_type: Some(AccountType::Student),
            is_active: true,
            ..Default::default()
        }
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation { message } => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[rstest]
    #[case::email(|u: &mut NewUser| u.email = None, "Users must have an email address!")]
    #[case::username(|u: &mut NewUser| u.username = Some("  ".to_string()), "Users must have username!")]
    #[case::password(|u: &mut NewUser| u.password = Some(String::new()), "Users must have a password!")]
    #[case::first_name(|u: &mut NewUser| u.first_name = None, "Users must have a first name!")]
    #[case::last_name(|u: &mut NewUser| u.last_name = None, "Users must have a last name!")]
    #[case::account_type(|u: &mut NewUser| u.account_type = None, "Users must have account type!")]
    fn missing_fields_are_reported(#[case] strip: fn(&mut NewUser), #[case] expected: &str) {
        let mut user = complete();
        strip(&mut user);
        let err = prepare_new_user(user, &config(), &phone_pattern()).unwrap_err();
        assert_eq!(message(err), expected);
    }

    #[test]
    fn email_is_checked_before_username() {
        let user = NewUser::default();
        let err = prepare_new_user(user, &config(), &phone_pattern()).unwrap_err();
        assert_eq!(message(err), "Users must have an email address!");
    }

    #[test]
    fn names_and_email_are_normalised() {
        let mut user = complete();
        user.middle_name = Some("santos".to_string());
        let request = prepare_new_user(user, &config(), &phone_pattern()).unwrap();
        assert_eq!(request.first_name, "Juan");
        assert_eq!(request.last_name, "Dela Cruz");
        assert_eq!(request.middle_name, "Santos");
        assert_eq!(request.email, "juan@example.edu");
        assert!(password::verify_password("s3cret", &request.password_hash));
    }

    #[test]
    fn username_length_is_limited() {
        let mut user = complete();
        user.username = Some("x".repeat(26));
        let err = prepare_new_user(user, &config(), &phone_pattern()).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[rstest]
    #[case("+63-917-1234-567", true)]
    #[case("", true)]
    #[case("09171234567", false)]
    fn phone_numbers_follow_pattern(#[case] phone: &str, #[case] ok: bool) {
        let mut user = complete();
        user.phone_number = Some(phone.to_string());
        assert_eq!(prepare_new_user(user, &config(), &phone_pattern()).is_ok(), ok);
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut user = complete();
        user.email = Some("not-an-email".to_string());
        assert!(prepare_new_user(user, &config(), &phone_pattern()).is_err());
    }
}
