mod basic;
mod warehouse;

pub use basic::BasicConfig;
pub use warehouse::{Backend, Credentials, WarehouseConfig};

use crate::error::AdminError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Storage backend settings (see `warehouse` table in config.toml).
    #[serde(default)]
    pub warehouse: WarehouseConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for overriding any field, e.g. `CURRENCY_ADMIN_BASIC__LISTEN_PORT=9000`.
const ENV_PREFIX: &str = "CURRENCY_ADMIN_";

/// Ambient Databricks variables, mapped onto `warehouse.*` by dropping the `DATABRICKS_` prefix.
const DATABRICKS_ENV_KEYS: [&str; 5] = [
    "DATABRICKS_WAREHOUSE_ID",
    "DATABRICKS_HOST",
    "DATABRICKS_TOKEN",
    "DATABRICKS_CLIENT_ID",
    "DATABRICKS_CLIENT_SECRET",
];

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file, and the environment.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment
            .merge(databricks_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates the configuration. Callers treat an error as fatal.
    pub fn load() -> Result<Self, AdminError> {
        let cfg: Self = Self::figment()
            .extract()
            .map_err(|e| AdminError::Configuration(format!("failed to extract configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        if self.basic.loglevel.trim().is_empty() {
            return Err(AdminError::Configuration(
                "basic.loglevel must not be empty".to_string(),
            ));
        }
        self.warehouse.validate()
    }
}

fn databricks_env() -> Env {
    Env::raw().only(&DATABRICKS_ENV_KEYS).map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        let field = key.trim_start_matches("databricks_");
        format!("warehouse.{field}").into()
    })
}
