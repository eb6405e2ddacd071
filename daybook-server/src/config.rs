//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file,
//! `DAYBOOK_*` environment variables. CLI flags are applied on top in main.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4096;
const DEFAULT_LOG_FILTER: &str = "info";
const ENV_PREFIX: &str = "DAYBOOK";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_seed_sample_events() -> bool {
    true
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// `DAYBOOK_*` overrides, read from the process environment unless `vars` is given.
fn environment(vars: Option<config::Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .source(vars)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Populate the store with a few events around today at startup
    #[serde(default = "default_seed_sample_events")]
    pub seed_sample_events: bool,

    /// tracing filter directive, used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl ServerConfig {
    /// ~/.config/daybook/config.toml (platform equivalent elsewhere)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("daybook").join("config.toml"))
    }

    /// Load from `path` if given (must exist), otherwise from the default
    /// path if present, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(path) = Self::default_config_path() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            }
        }

        let builder = builder.add_source(environment(None));

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid host address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
