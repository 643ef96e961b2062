use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Port the server listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 42069;

/// Server settings.
///
/// Every field has a default, so neither the `LISTEN` variable nor a
/// config file is needed to run on [`DEFAULT_PORT`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Config {
    /// Default address, overridden by the `LISTEN` environment variable.
    pub fn load() -> Self {
        let listen_addr = std::env::var("LISTEN").unwrap_or_else(|_| default_listen_addr());
        Self { listen_addr }
    }

    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(s).context("invalid config")
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml_str(&content)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    format!("0.0.0.0:{DEFAULT_PORT}")
}
