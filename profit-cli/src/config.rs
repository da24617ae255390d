//! TOML configuration file.
//!
//! ```toml
//! [engine]
//! capital_cost_base = "all_assets"
//!
//! [engine.payroll_charges]
//! social_charges_rate = 0.30
//!
//! [inputs]
//! revenue = 42000
//! ideal_margin_pct = 15
//! ```
//!
//! Every section and key is optional. Keys under `[inputs]` are input field
//! names and override the built-in defaults.

use std::collections::BTreeMap;
use std::path::Path;

use profit_core::calculations::{EngineConfig, EngineConfigError};
use profit_core::{InputField, SimulationInputs};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown input field '{0}' in [inputs]")]
    UnknownField(String),

    #[error(transparent)]
    Engine(#[from] EngineConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub inputs: BTreeMap<String, Decimal>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::parse_str(&text)
    }

    /// Parses and validates a configuration document.
    pub fn parse_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.engine.validate()?;
        for key in config.inputs.keys() {
            if InputField::parse(key).is_none() {
                return Err(ConfigError::UnknownField(key.clone()));
            }
        }
        Ok(config)
    }

    /// Default inputs with the `[inputs]` overrides applied.
    pub fn base_inputs(&self) -> SimulationInputs {
        let mut inputs = SimulationInputs::default();
        for (key, value) in &self.inputs {
            if let Some(field) = InputField::parse(key) {
                inputs.set(field, *value);
            }
        }
        inputs
    }
}
