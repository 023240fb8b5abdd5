//! Server configuration, read from an optional TOML file and `ROSTER_*`
//! environment variables (the latter win).

use std::{path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime server configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  /// Base URL of the ViaCEP-compatible lookup service.
  pub postal_base_url:      String,
  pub postal_timeout_secs:  u64,
  /// Artificial delay before every store operation.
  pub simulated_latency_ms: u64,
  /// Create two sample people at startup when the store is empty.
  pub seed_samples:         bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".to_string(),
      port:                 8080,
      postal_base_url:      roster_postal::client::DEFAULT_BASE_URL.to_string(),
      postal_timeout_secs:  roster_postal::client::DEFAULT_TIMEOUT.as_secs(),
      simulated_latency_ms: 0,
      seed_samples:         false,
    }
  }
}

impl ServerConfig {
  /// Layer `path` (if it exists) and the environment over the defaults.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::build(path, Environment::with_prefix("ROSTER"))
  }

  fn build(path: &Path, env: Environment) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn postal_timeout(&self) -> Duration {
    Duration::from_secs(self.postal_timeout_secs)
  }

  pub fn simulated_latency(&self) -> Duration {
    Duration::from_millis(self.simulated_latency_ms)
  }
}
