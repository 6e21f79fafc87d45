//! API configuration: defaults, optional YAML file, environment overrides.
use abacus_core::Base;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG/cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("CONFIG/invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("CONFIG/{key} has invalid value {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub addr: String,
    /// Base used when a request omits one
    pub default_base: u32,
    /// Longest accepted expression, in characters
    pub max_expression_len: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            default_base: 10,
            max_expression_len: 256,
        }
    }
}

impl ApiConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Build from `ABACUS_CONFIG` (if set) plus `ABACUS_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: Vec<(String, String)> = std::env::vars().collect();
        Self::from_vars(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    pub fn from_vars<'a, I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let vars: Vec<_> = vars.into_iter().collect();
        let lookup = |key: &str| vars.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

        let mut config = match lookup("ABACUS_CONFIG") {
            Some(path) => Self::load_file(Path::new(path))?,
            None => Self::default(),
        };

        if let Some(addr) = lookup("ABACUS_ADDR") {
            config.addr = addr.to_string();
        }
        if let Some(base) = lookup("ABACUS_DEFAULT_BASE") {
            config.default_base = base.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ABACUS_DEFAULT_BASE",
                value: base.to_string(),
            })?;
        }
        if let Some(len) = lookup("ABACUS_MAX_EXPRESSION_LEN") {
            config.max_expression_len = len.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ABACUS_MAX_EXPRESSION_LEN",
                value: len.to_string(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Base::new(self.default_base).map_err(|_| ConfigError::InvalidValue {
            key: "default_base",
            value: self.default_base.to_string(),
        })?;
        if self.max_expression_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_expression_len",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}
