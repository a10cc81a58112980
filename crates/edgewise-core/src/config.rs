//! Engine configuration.
//!
//! Configuration is layered with `figment`, later sources overriding earlier
//! ones:
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. environment variables prefixed `EDGEWISE_`, nested keys separated by
//!    `__` (e.g. `EDGEWISE_TRAVERSAL__PATHS_MAX_LENGTH=4`)

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "EDGEWISE_";

/// Defaults applied by the graph functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Max depth used by `TRAVERSAL`/`TRAVERSAL_TREE` when the options omit
    /// `maxDepth`. `None` leaves the traversal unbounded.
    pub default_max_depth: Option<usize>,
    /// Default `max_length` for `PATHS`.
    pub paths_max_length: usize,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            default_max_depth: None,
            paths_max_length: 10,
        }
    }
}

/// Logging settings consumed by [`crate::logging::init_tracing`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Include the event target in formatted output.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub traversal: TraversalSettings,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Builds the layered figment without extracting it.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates the configuration.
    ///
    /// A missing file is treated as empty.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::from_figment(&Self::figment(file))
    }

    /// Extracts and validates a configuration from any figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.traversal.paths_max_length == 0 {
            return Err(Error::Config(
                "traversal.paths_max_length must be greater than 0".into(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".into()));
        }
        Ok(())
    }
}
