//! Configuration loading for the accounting core.
//!
//! Configuration is a small YAML document, usually `heroic-crafting.yaml`
//! next to the host module's data. Every field is optional; an empty file
//! yields the published spending table, `Ignore` platinum policy, and
//! `info` logging.
//!
//! ```yaml
//! accounting:
//!   platinum_policy: ignore
//!   default_payment_policy: preferTrove
//!   hourly_spending_limit: ["3 sp", "5 sp", ...]   # exactly 20 entries
//! logging:
//!   level: debug
//! ```

use std::path::Path;

use serde::Deserialize;

use heroic_coins::{CoinError, parse_coins};
use heroic_trove::{SpendingSchedule, TroveError};
use heroic_types::{PaymentPolicy, PlatinumPolicy};

use crate::payment::Accounting;

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "HEROIC_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An entry of the spending limit override was not a valid amount.
    #[error("hourly_spending_limit entry for level {level}: {source}")]
    ScheduleEntry {
        /// The level whose entry failed to parse.
        level: usize,
        /// The underlying parse error.
        source: CoinError,
    },

    /// The spending limit override did not form a valid schedule.
    #[error("invalid hourly_spending_limit: {0}")]
    Schedule(#[from] TroveError),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CraftingConfig {
    /// Accounting parameters.
    #[serde(default)]
    pub accounting: AccountingConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CraftingConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `HEROIC_LOG` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| !l.trim().is_empty()) {
            self.logging.level = level;
        }
    }

    /// The spending schedule, with the override applied if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ScheduleEntry`] for an unparsable amount and
    /// [`ConfigError::Schedule`] for a wrong count or a zero value.
    pub fn schedule(&self) -> Result<SpendingSchedule, ConfigError> {
        let Some(entries) = &self.accounting.hourly_spending_limit else {
            return Ok(SpendingSchedule::standard());
        };

        let values = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                parse_coins(entry).map_err(|source| ConfigError::ScheduleEntry {
                    level: index.saturating_add(1),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SpendingSchedule::from_hourly(values)?)
    }

    /// An accounting context built from this configuration.
    ///
    /// # Errors
    ///
    /// Fails as [`CraftingConfig::schedule`] does.
    pub fn accounting(&self) -> Result<Accounting, ConfigError> {
        Ok(Accounting::new(
            self.schedule()?,
            self.accounting.platinum_policy,
        ))
    }
}

/// Accounting parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountingConfig {
    /// Whether normalized amounts may use platinum.
    #[serde(default)]
    pub platinum_policy: PlatinumPolicy,

    /// Policy used when a request does not name one.
    #[serde(default)]
    pub default_payment_policy: PaymentPolicy,

    /// Replacement hourly spending limits, level 1 first.
    #[serde(default)]
    pub hourly_spending_limit: Option<Vec<String>>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
