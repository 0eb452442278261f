//! Engine configuration.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `NAMEBUILDER__<SECTION>__<KEY>` pattern
//!
//! The loaded values are defaults only: each pipeline call receives an
//! explicit [`ResolutionSettings`] snapshot, so there is no process-wide
//! mutable settings object.

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::ConflictStrategy;

/// Engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Conflict-resolution defaults.
    #[serde(default)]
    pub resolution: ResolutionSettings,

    /// Existence-check result cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Existence-oracle boundary configuration.
    #[serde(default)]
    pub oracle: OracleConfig,
}

impl EngineConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override
    /// earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{NAMEBUILDER_PROFILE}.toml` (if `NAMEBUILDER_PROFILE` is set)
    /// 3. Environment variables with `NAMEBUILDER__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let profile =
            std::env::var("NAMEBUILDER_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // NAMEBUILDER__RESOLUTION__MAX_ATTEMPTS=25 -> resolution.max_attempts = 25
            .add_source(
                Environment::with_prefix("NAMEBUILDER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let engine_config: Self = config.try_deserialize()?;
        engine_config.validate()?;

        Ok(engine_config)
    }

    /// Load configuration from a specific file, applying environment
    /// overrides on top. For embedding applications that manage their own
    /// configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the result is invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("NAMEBUILDER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let engine_config: Self = config.try_deserialize()?;
        engine_config.validate()?;

        Ok(engine_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.max_attempts == 0 {
            return Err(ConfigError::Message(
                "resolution.max_attempts cannot be 0".to_string(),
            ));
        }

        if self.oracle.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "oracle.timeout_seconds cannot be 0".to_string(),
            ));
        }

        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "cache.ttl_seconds cannot be 0 while the cache is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

/// Conflict-resolution settings.
///
/// A value-type snapshot of how one resolution call should behave; the
/// pipeline copies it per call rather than reading shared state.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResolutionSettings {
    /// Strategy applied when the candidate name collides.
    #[serde(default)]
    pub strategy: ConflictStrategy,

    /// Upper bound on oracle-consulting attempts per resolution.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Whether advisory warnings are attached to success outcomes.
    #[serde(default = "default_include_warnings")]
    pub include_warnings: bool,

    /// Whether the pipeline checks the candidate against the external
    /// namespace at all. When false, composition and validation alone
    /// produce the final name.
    #[serde(default = "default_check_existence")]
    pub check_existence: bool,
}

const fn default_max_attempts() -> u32 {
    10
}

const fn default_include_warnings() -> bool {
    true
}

const fn default_check_existence() -> bool {
    true
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        Self {
            strategy: ConflictStrategy::default(),
            max_attempts: default_max_attempts(),
            include_warnings: default_include_warnings(),
            check_existence: default_check_existence(),
        }
    }
}

/// Existence-check result cache configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// Whether existence results are cached at all.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Validity window for a cached existence result, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

const fn default_cache_enabled() -> bool {
    true
}

const fn default_cache_ttl() -> u64 {
    300
}

impl CacheConfig {
    /// The validity window as a [`Duration`].
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

/// Existence-oracle boundary configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OracleConfig {
    /// Per-call timeout for live existence checks, in seconds.
    #[serde(default = "default_oracle_timeout")]
    pub timeout_seconds: u64,
}

const fn default_oracle_timeout() -> u64 {
    5
}

impl OracleConfig {
    /// The per-call timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_oracle_timeout(),
        }
    }
}
