//! Service configuration.
//!
//! Read from TOML. Every key has a default, so an empty file (or no file at
//! all) is a valid configuration:
//!
//! ```toml
//! [server]
//! addr = "0.0.0.0:8000"
//! max-body-size = 262144
//!
//! [app]
//! page-size = 10
//! transport-status = "always-ok"   # or "mapped"
//!
//! [tracing]
//! filter = "info"
//!
//! [[tags]]
//! id = 1
//! name = "rust"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::envelope::TransportStatus;
use crate::error::Error;
use crate::model::Tag;
use crate::server::DEFAULT_MAX_BODY_SIZE;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "SCRIBE_CONFIG";
/// Environment variable overriding `server.addr`.
pub const ADDR_ENV: &str = "SCRIBE_ADDR";
/// Config file used when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "config/scribe.toml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub server: ServerConfig,
    pub app: AppConfig,
    pub tracing: TracingConfig,
    /// Tags available to articles at startup.
    pub tags: Vec<Tag>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerConfig {
    pub addr: String,
    /// Largest request body, in bytes, the server buffers.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: "0.0.0.0:8000".to_owned(), max_body_size: DEFAULT_MAX_BODY_SIZE }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppConfig {
    pub page_size: u32,
    pub transport_status: TransportStatus,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { page_size: 10, transport_status: TransportStatus::AlwaysOk }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TracingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { filter: "info".to_owned() }
    }
}

impl Config {
    /// Loads the config the binary runs with.
    ///
    /// `$SCRIBE_CONFIG` if set, else `config/scribe.toml` if present, else
    /// defaults. `$SCRIBE_ADDR` then overrides the listen address.
    pub fn load() -> Result<Self, Error> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.server.addr = addr;
        }
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data, &path.display().to_string())
    }

    /// Parses TOML text. `origin` names the source in error messages.
    pub fn parse(data: &str, origin: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(data).map_err(|source| Error::ConfigParse {
            path: origin.to_owned(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.app.page_size == 0 {
            return Err(Error::Config("app.page-size must be greater than 0".into()));
        }
        if self.server.max_body_size == 0 {
            return Err(Error::Config("server.max-body-size must be greater than 0".into()));
        }
        if let Some(tag) = self.tags.iter().find(|t| t.id == 0) {
            return Err(Error::Config(format!("tag `{}` must have an id greater than 0", tag.name)));
        }
        Ok(())
    }
}
