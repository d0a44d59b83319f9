use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub mod defaults;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub accounts: AccountsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Rules applied when averaging subject grades into a semester GPA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Subjects whose code matches this pattern never count towards the GPA
    #[serde(default = "default_excluded_subject_pattern")]
    pub excluded_subject_pattern: String,
    /// Final grade values that carry no numeric weight
    #[serde(default = "default_non_gradable_marks")]
    pub non_gradable_marks: Vec<String>,
    /// Decimal places kept in the rendered GPA
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,
    #[serde(default = "default_username_max_length")]
    pub username_max_length: usize,
    #[serde(default = "default_password_hash_iterations")]
    pub password_hash_iterations: u32,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

// Grading defaults
fn default_excluded_subject_pattern() -> String {
    DEFAULT_EXCLUDED_SUBJECT_PATTERN.to_string()
}

fn default_non_gradable_marks() -> Vec<String> {
    DEFAULT_NON_GRADABLE_MARKS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_decimal_places() -> u32 {
    DEFAULT_DECIMAL_PLACES
}

// Account defaults
fn default_phone_pattern() -> String {
    DEFAULT_PHONE_PATTERN.to_string()
}

fn default_username_max_length() -> usize {
    DEFAULT_USERNAME_MAX_LENGTH
}

fn default_password_hash_iterations() -> u32 {
    DEFAULT_PASSWORD_HASH_ITERATIONS
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            excluded_subject_pattern: default_excluded_subject_pattern(),
            non_gradable_marks: default_non_gradable_marks(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            phone_pattern: default_phone_pattern(),
            username_max_length: default_username_max_length(),
            password_hash_iterations: default_password_hash_iterations(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: Some(DEFAULT_MAX_CONNECTIONS),
            },
            web: WebConfig {
                host: default_host(),
                port: default_port(),
                base_url: default_base_url(),
            },
            grading: GradingConfig::default(),
            accounts: AccountsConfig::default(),
        }
    }
}

impl Config {
    /// Layer defaults, the TOML file and `GRADING_*` environment variables.
    ///
    /// A missing file is created with the default configuration.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if !Path::new(config_file).exists() {
            let contents = toml::to_string_pretty(&Self::default())?;
            std::fs::write(config_file, contents)
                .with_context(|| format!("Failed to write default config file: {config_file}"))?;
            info!("Created default config file: {}", config_file);
        }

        let config: Config = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load configuration from {config_file}"))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot start with
    pub fn validate(&self) -> Result<()> {
        regex::Regex::new(&self.grading.excluded_subject_pattern)
            .context("grading.excluded_subject_pattern is not a valid regex")?;
        regex::Regex::new(&self.accounts.phone_pattern)
            .context("accounts.phone_pattern is not a valid regex")?;
        if self.accounts.username_max_length == 0 {
            anyhow::bail!("accounts.username_max_length must be greater than zero");
        }
        if self.accounts.password_hash_iterations == 0 {
            anyhow::bail!("accounts.password_hash_iterations must be greater than zero");
        }
        if self.grading.decimal_places > 6 {
            anyhow::bail!("grading.decimal_places must be at most 6");
        }
        Ok(())
    }
}
