//! Account domain types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::entities::users;

/// Role chosen when an account is created
///
/// Parsing is case-insensitive; the form placeholder `---Select---` does not
/// parse and is treated as a missing account type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AccountType {
    Student,
    Faculty,
    Staff,
    Administrator,
}

impl AccountType {
    /// Role flags stored on the user row: (is_student, is_faculty, is_staff, is_superuser)
    pub fn flags(self) -> (bool, bool, bool, bool) {
        match self {
            AccountType::Student => (true, false, false, false),
            AccountType::Faculty => (false, true, false, false),
            AccountType::Staff => (false, false, true, false),
            AccountType::Administrator => (false, false, true, true),
        }
    }

    /// Which profile table backs this role
    pub fn profile_kind(self) -> ProfileKind {
        match self {
            AccountType::Student => ProfileKind::Student,
            AccountType::Faculty => ProfileKind::Faculty,
            AccountType::Staff | AccountType::Administrator => ProfileKind::Staff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Student,
    Faculty,
    Staff,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// A persisted account, without credentials
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: String,
    pub photo: Option<String>,
    pub phone_number: String,
    pub is_active: bool,
    pub is_student: bool,
    pub is_faculty: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Middle Last", dropping the middle name when it is blank
    pub fn full_name(&self) -> String {
        if self.middle_name.trim().is_empty() {
            return self.short_name();
        }
        format!("{} {} {}", self.first_name, self.middle_name, self.last_name)
    }

    /// "First Last"
    pub fn short_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Role label used in listings. Superuser wins over every other flag.
    pub fn account_type_label(&self) -> &'static str {
        if self.is_superuser {
            "Administrator"
        } else if self.is_student {
            "Student"
        } else if self.is_faculty {
            "Faculty"
        } else if self.is_staff {
            "Staff"
        } else {
            "Floating Account"
        }
    }

    pub fn account_type(&self) -> Option<AccountType> {
        if self.is_superuser {
            Some(AccountType::Administrator)
        } else if self.is_student {
            Some(AccountType::Student)
        } else if self.is_faculty {
            Some(AccountType::Faculty)
        } else if self.is_staff {
            Some(AccountType::Staff)
        } else {
            None
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.account_type_label())
    }
}

impl From<users::Model> for User {
    fn from(m: users::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            middle_name: m.middle_name,
            birth_date: m.birth_date,
            gender: m.gender.as_deref().and_then(|g| g.parse().ok()),
            address: m.address,
            photo: m.photo,
            phone_number: m.phone_number,
            is_active: m.is_active,
            is_student: m.is_student,
            is_faculty: m.is_faculty,
            is_staff: m.is_staff,
            is_superuser: m.is_superuser,
            date_joined: m.date_joined,
            updated_at: m.updated_at,
        }
    }
}

/// Input for account creation. Required fields are optional here so that
/// their absence is reported by the account service with a specific message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_account_type")]
    #[schema(value_type = Option<String>, example = "Student")]
    pub account_type: Option<AccountType>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

/// Unknown labels such as `---Select---` read as an absent account type
fn lenient_account_type<'de, D>(deserializer: D) -> Result<Option<AccountType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

/// Validated, normalised account ready to be written
#[derive(Debug, Clone)]
pub struct UserCreateRequest {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub account_type: AccountType,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: String,
    pub phone_number: String,
    pub is_active: bool,
}

/// Contact and personal details that may change after creation.
/// `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserContactUpdate {
    pub middle_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo: Option<String>,
}

/// The role-specific extension of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Student { id: i32, user_id: i32 },
    Faculty { id: i32, user_id: i32, is_chairperson: bool },
    Staff { id: i32, user_id: i32 },
}

impl Profile {
    pub fn id(&self) -> i32 {
        match self {
            Profile::Student { id, .. } | Profile::Faculty { id, .. } | Profile::Staff { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> ProfileKind {
        match self {
            Profile::Student { .. } => ProfileKind::Student,
            Profile::Faculty { .. } => ProfileKind::Faculty,
            Profile::Staff { .. } => ProfileKind::Staff,
        }
    }
}

/// A user together with its role profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub user: User,
    pub profile: Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 1,
            username: "jdelacruz".to_string(),
            email: "juan@example.edu".to_string(),
            first_name: "Juan".to_string(),
            last_name: "Dela Cruz".to_string(),
            middle_name: "".to_string(),
            birth_date: None,
            gender: Some(Gender::Male),
            address: String::new(),
            photo: None,
            phone_number: String::new(),
            is_active: true,
            is_student: true,
            is_faculty: false,
            is_staff: false,
            is_superuser: false,
            date_joined: now,
            updated_at: now,
        }
    }

    #[test]
    fn account_type_parses_case_insensitively() {
        assert_eq!("student".parse::<AccountType>().unwrap(), AccountType::Student);
        assert_eq!("ADMINISTRATOR".parse::<AccountType>().unwrap(), AccountType::Administrator);
        assert!("---Select---".parse::<AccountType>().is_err());
    }

    #[test]
    fn administrators_carry_staff_and_superuser_flags() {
        assert_eq!(AccountType::Administrator.flags(), (false, false, true, true));
        assert_eq!(AccountType::Administrator.profile_kind(), ProfileKind::Staff);
        assert_eq!(AccountType::Faculty.profile_kind(), ProfileKind::Faculty);
    }

    #[test]
    fn display_includes_role_label() {
        let mut user = sample_user();
        assert_eq!(user.to_string(), "Juan Dela Cruz (Student)");

        user.middle_name = "Santos".to_string();
        assert_eq!(user.full_name(), "Juan Santos Dela Cruz");
        assert_eq!(user.short_name(), "Juan Dela Cruz");

        user.is_student = false;
        assert_eq!(user.account_type_label(), "Floating Account");
        assert_eq!(user.account_type(), None);

        user.is_staff = true;
        user.is_superuser = true;
        assert_eq!(user.account_type_label(), "Administrator");
    }

    #[test]
    fn placeholder_account_type_deserializes_as_missing() {
        let user: NewUser =
            serde_json::from_str(r#"{"username":"a","account_type":"---Select---"}"#).unwrap();
        assert_eq!(user.account_type, None);
        assert!(user.is_active);

        let user: NewUser = serde_json::from_str(r#"{"account_type":"faculty"}"#).unwrap();
        assert_eq!(user.account_type, Some(AccountType::Faculty));
    }

    #[test]
    fn gender_round_trips_through_storage_strings() {
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
    }
}
