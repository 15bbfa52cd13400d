use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::VisibilityRules;
use crate::models::MissingFieldPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub visibility: VisibilitySettings,
    #[serde(default)]
    pub explore: ExploreSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

/// Missing-field handling per call site.
///
/// The profile page, explore and messaging historically disagree on how an
/// unset gender or preference is treated, so each one is configured on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct VisibilitySettings {
    #[serde(default = "default_profile_policy")]
    pub profile_missing_fields: MissingFieldPolicy,
    #[serde(default = "default_explore_policy")]
    pub explore_missing_fields: MissingFieldPolicy,
    #[serde(default = "default_contact_policy")]
    pub contact_missing_fields: MissingFieldPolicy,
    #[serde(default)]
    pub enforce_user_type_pairing: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            profile_missing_fields: default_profile_policy(),
            explore_missing_fields: default_explore_policy(),
            contact_missing_fields: default_contact_policy(),
            enforce_user_type_pairing: false,
        }
    }
}

impl VisibilitySettings {
    pub fn profile_rules(&self) -> VisibilityRules {
        VisibilityRules::new(self.profile_missing_fields, self.enforce_user_type_pairing)
    }

    pub fn explore_rules(&self) -> VisibilityRules {
        VisibilityRules::new(self.explore_missing_fields, self.enforce_user_type_pairing)
    }

    pub fn contact_rules(&self) -> VisibilityRules {
        VisibilityRules::new(self.contact_missing_fields, self.enforce_user_type_pairing)
    }

    /// True when call sites would disagree on an unset gender or preference.
    pub fn policies_diverge(&self) -> bool {
        self.profile_missing_fields != self.explore_missing_fields
            || self.profile_missing_fields != self.contact_missing_fields
    }
}

fn default_profile_policy() -> MissingFieldPolicy { MissingFieldPolicy::Unfilled }
fn default_explore_policy() -> MissingFieldPolicy { MissingFieldPolicy::LegacyDefaults }
fn default_contact_policy() -> MissingFieldPolicy { MissingFieldPolicy::Unfilled }

#[derive(Debug, Clone, Deserialize)]
pub struct ExploreSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for ExploreSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 20 }
fn default_max_limit() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SUGAR_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., SUGAR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SUGAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SUGAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables that do not follow the SUGAR__ scheme
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(redis_url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", redis_url)?;
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}
