use std::path::Path;
use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::auth::{Credentials, Secret};
use crate::error::{Result, StabilityError};
use crate::models::Instance;

pub const DEFAULT_CONFIG_PATH: &str = "etc/config.yaml";

const DEFAULT_MAX_CONCURRENCY: usize = 16;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// What to do when fetching one job's builds fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The first failed job aborts the whole collection.
    Abort,
    /// Failed jobs are reported as unavailable; everything else is kept.
    #[default]
    Isolate,
}

/// Validated settings for a single collection run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub max_concurrency: usize,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub instances: Vec<Instance>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    #[serde(default = "default_max_concurrency")]
    max_concurrency: usize,
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
    #[serde(default)]
    failure_policy: FailurePolicy,
    #[serde(default)]
    instances: IndexMap<String, RawInstance>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawInstance {
    #[serde(default, alias = "jenkinsurl")]
    url: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: Option<Secret>,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StabilityError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let raw: RawSettings = serde_yaml::from_str(contents)
            .map_err(|e| StabilityError::Config(format!("Malformed configuration: {e}")))?;

        raw.validate()
    }
}

impl RawSettings {
    fn validate(self) -> Result<Settings> {
        if self.max_concurrency == 0 {
            return Err(StabilityError::Config(
                "max_concurrency must be at least 1".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(StabilityError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }

        if self.instances.is_empty() {
            return Err(StabilityError::Config(
                "No CI instances configured".to_string(),
            ));
        }

        let instances = self
            .instances
            .into_iter()
            .map(|(name, raw)| raw.into_instance(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Settings {
            max_concurrency: self.max_concurrency,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            failure_policy: self.failure_policy,
            instances,
        })
    }
}

impl RawInstance {
    fn into_instance(self, name: String) -> Result<Instance> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(StabilityError::Config(format!(
                "Instance '{name}': missing url"
            )));
        }

        let base_url = Url::parse(url).map_err(|e| {
            StabilityError::Config(format!("Instance '{name}': invalid url '{url}': {e}"))
        })?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(StabilityError::Config(format!(
                "Instance '{name}': unsupported url scheme '{}'",
                base_url.scheme()
            )));
        }

        if self.username.is_empty() {
            return Err(StabilityError::Config(format!(
                "Instance '{name}': missing username"
            )));
        }

        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| StabilityError::Config(format!("Instance '{name}': missing password")))?;

        Ok(Instance {
            name,
            base_url,
            credentials: Credentials::new(self.username, password),
        })
    }
}
