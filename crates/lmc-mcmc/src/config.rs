use std::fs;
use std::path::Path;

use lmc_core::errors::ErrorInfo;
use lmc_core::LmcError;
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters governing a sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Metropolis-Hastings transitions between two retained samples.
    pub num_steps: usize,
    /// Number of retained samples per chain.
    pub num_samples: usize,
    /// Number of independent chains launched by `run_chains`.
    #[serde(default = "default_chains")]
    pub chains: usize,
    /// Initial-state search settings.
    #[serde(default)]
    pub init: InitConfig,
    /// Rejection sampler settings.
    #[serde(default)]
    pub rejection: RejectionConfig,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_chains() -> usize {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_steps: 100,
            num_samples: 10,
            chains: default_chains(),
            init: InitConfig::default(),
            rejection: RejectionConfig::default(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl RunConfig {
    /// Parses a configuration from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, LmcError> {
        let config: RunConfig = serde_yaml::from_str(text).map_err(|err| {
            LmcError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, LmcError> {
        let text = fs::read_to_string(path).map_err(|err| {
            LmcError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text).map_err(|err| match err {
            LmcError::Config(info) => {
                LmcError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Serializes the configuration as YAML.
    pub fn to_yaml_string(&self) -> Result<String, LmcError> {
        serde_yaml::to_string(self).map_err(|err| {
            LmcError::Config(ErrorInfo::new("config-serialize", err.to_string()))
        })
    }

    /// Rejects values no sampler can run with.
    pub fn validate(&self) -> Result<(), LmcError> {
        let invalid = |field: &str, message: &str| {
            Err(LmcError::Config(
                ErrorInfo::new("config-invalid", message).with_context("field", field),
            ))
        };
        if self.num_samples == 0 {
            return invalid("num_samples", "at least one sample must be requested");
        }
        if self.chains == 0 {
            return invalid("chains", "at least one chain is required");
        }
        if self.rejection.batch_size == 0 {
            return invalid("rejection.batch_size", "batch size must be positive");
        }
        if self.rejection.concurrency == 0 {
            return invalid("rejection.concurrency", "concurrency must be positive");
        }
        if self.init.max_attempts == Some(0) || self.rejection.max_attempts == Some(0) {
            return invalid("max_attempts", "attempt budgets must be positive when set");
        }
        Ok(())
    }
}

/// Initial-state search settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfig {
    /// Maximum executions before giving up. Unbounded when absent.
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

/// Rejection sampler settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionConfig {
    /// Samples handed to the dispatch backend per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Worker threads used by the thread-pool backend.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Maximum executions per sample before giving up. Unbounded when absent.
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

fn default_batch_size() -> usize {
    100
}

fn default_concurrency() -> usize {
    1
}

impl Default for RejectionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            concurrency: default_concurrency(),
            max_attempts: None,
        }
    }
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in logs alongside the seed.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    7
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}
