use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::model::Service;
use crate::model::service::is_valid_service_name;
use crate::shuffle::{MAX_DEGREE, MIN_DEGREE};

pub const DEFAULT_SHUFFLE_DEGREE: u8 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvalConfig {
    #[serde(default)]
    pub source_lang: String,
    #[serde(default)]
    pub target_lang: String,
    #[serde(default = "default_shuffle_degree")]
    pub shuffle_degree: u8,
    #[serde(default)]
    pub seed: Option<u64>,
    pub services: Vec<ServiceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    #[serde(flatten)]
    pub translator: TranslatorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranslatorConfig {
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        strip_unknown_marks: bool,
    },
    Corpus {
        source: PathBuf,
        output: PathBuf,
    },
}

fn default_shuffle_degree() -> u8 {
    DEFAULT_SHUFFLE_DEGREE
}

impl EvalConfig {
    pub fn load(path: &Path) -> Result<EvalConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = EvalConfig::from_json(&text).map_err(|e| match e {
            ConfigError::Json { source, .. } => ConfigError::Json {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), services = config.services.len(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<EvalConfig, ConfigError> {
        let config: EvalConfig = serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.services.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one service is required".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for svc in &self.services {
            if !is_valid_service_name(&svc.name) {
                return Err(ConfigError::Invalid(format!(
                    "service name {:?} must be non-empty ASCII letters, digits or '_'",
                    svc.name
                )));
            }
            if !seen.insert(svc.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate service name {:?}",
                    svc.name
                )));
            }
        }
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&self.shuffle_degree) {
            return Err(ConfigError::Invalid(format!(
                "shuffle_degree must be between {MIN_DEGREE} and {MAX_DEGREE}, got {}",
                self.shuffle_degree
            )));
        }
        Ok(())
    }

    /// Services in configuration order.
    pub fn services(&self) -> Vec<Service> {
        self.services
            .iter()
            .map(|s| Service::new(s.name.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
