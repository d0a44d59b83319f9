/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./grading-system.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

// Grading defaults
pub const DEFAULT_EXCLUDED_SUBJECT_PATTERN: &str = r"^NSTP|PHED";
pub const DEFAULT_NON_GRADABLE_MARKS: &[&str] = &["P", "W", "D", "NOT S", "INC", ""];
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

// Account defaults
pub const DEFAULT_PHONE_PATTERN: &str = r"^\+63-\d{3}-\d{4}-\d{3}$";
pub const DEFAULT_USERNAME_MAX_LENGTH: usize = 25;
pub const DEFAULT_PASSWORD_HASH_ITERATIONS: u32 = 10_000;

// Environment
pub const ENV_PREFIX: &str = "GRADING_";
