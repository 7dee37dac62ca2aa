use crate::db::schema::{DEFAULT_TABLE, is_valid_table_name};
use crate::error::AdminError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use url::Url;

/// Which storage backend the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Remote Databricks SQL warehouse.
    #[default]
    Databricks,
    /// Local SQLite file, for development and tests.
    Sqlite,
}

/// Ambient warehouse credentials.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access token sent as a bearer token.
    Token(String),
    /// Service principal exchanged for a token via OAuth2 client credentials.
    ServicePrincipal {
        client_id: String,
        client_secret: String,
    },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.write_str("Token(<redacted>)"),
            Credentials::ServicePrincipal { client_id, .. } => f
                .debug_struct("ServicePrincipal")
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .finish(),
        }
    }
}

/// Warehouse configuration (the `warehouse` table, plus `DATABRICKS_*` environment variables).
#[derive(Clone, Deserialize, Serialize)]
pub struct WarehouseConfig {
    /// TOML: `warehouse.backend`. Default: `databricks`.
    #[serde(default)]
    pub backend: Backend,

    /// SQL warehouse id. Env: `DATABRICKS_WAREHOUSE_ID`. Required for `databricks`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub warehouse_id: Option<String>,

    /// Workspace host, with or without scheme. Env: `DATABRICKS_HOST`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub host: Option<String>,

    /// Personal access token. Env: `DATABRICKS_TOKEN`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub token: Option<String>,

    /// Service principal id. Env: `DATABRICKS_CLIENT_ID`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub client_id: Option<String>,

    /// Service principal secret. Env: `DATABRICKS_CLIENT_SECRET`.
    #[serde(default, deserialize_with = "deserialize_opt_string_lax")]
    pub client_secret: Option<String>,

    /// SQLite URL for the `sqlite` backend. Default: `sqlite://currency.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Fully-qualified table name. The `sqlite` backend uses its last segment.
    #[serde(default = "default_table")]
    pub table: String,

    /// Server-side statement wait in seconds, clamped to 5..=50.
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Whole-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            warehouse_id: None,
            host: None,
            token: None,
            client_id: None,
            client_secret: None,
            database_url: default_database_url(),
            table: default_table(),
            wait_timeout_secs: default_wait_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for WarehouseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarehouseConfig")
            .field("backend", &self.backend)
            .field("warehouse_id", &self.warehouse_id)
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("database_url", &self.database_url)
            .field("table", &self.table)
            .field("wait_timeout_secs", &self.wait_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl WarehouseConfig {
    /// Local SQLite configuration, mostly for tests.
    pub fn sqlite(database_url: impl Into<String>) -> Self {
        Self {
            backend: Backend::Sqlite,
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Checks that the selected backend has everything it needs.
    pub fn validate(&self) -> Result<(), AdminError> {
        if !is_valid_table_name(&self.table) {
            return Err(AdminError::Configuration(format!(
                "warehouse.table must be dot-separated identifiers, got '{}'",
                self.table
            )));
        }
        match self.backend {
            Backend::Databricks => {
                self.warehouse_id()?;
                self.host_url()?;
                self.credentials()?;
            }
            Backend::Sqlite => {
                if self.database_url.trim().is_empty() {
                    return Err(AdminError::Configuration(
                        "warehouse.database_url must be set for the sqlite backend".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn warehouse_id(&self) -> Result<&str, AdminError> {
        non_empty(self.warehouse_id.as_deref()).ok_or_else(|| {
            AdminError::Configuration("DATABRICKS_WAREHOUSE_ID must be set".to_string())
        })
    }

    /// Workspace base URL; a bare hostname gets `https://`.
    pub fn host_url(&self) -> Result<Url, AdminError> {
        let host = non_empty(self.host.as_deref()).ok_or_else(|| {
            AdminError::Configuration("DATABRICKS_HOST must be set".to_string())
        })?;
        let with_scheme = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        let mut url = Url::parse(&with_scheme).map_err(|e| {
            AdminError::Configuration(format!("DATABRICKS_HOST is not a valid URL: {e}"))
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// A token wins over a service principal when both are present.
    pub fn credentials(&self) -> Result<Credentials, AdminError> {
        if let Some(token) = non_empty(self.token.as_deref()) {
            return Ok(Credentials::Token(token.to_string()));
        }
        match (
            non_empty(self.client_id.as_deref()),
            non_empty(self.client_secret.as_deref()),
        ) {
            (Some(id), Some(secret)) => Ok(Credentials::ServicePrincipal {
                client_id: id.to_string(),
                client_secret: secret.to_string(),
            }),
            _ => Err(AdminError::Configuration(
                "set DATABRICKS_TOKEN, or DATABRICKS_CLIENT_ID and DATABRICKS_CLIENT_SECRET"
                    .to_string(),
            )),
        }
    }

    /// The table name as the selected backend addresses it.
    pub fn table_name(&self) -> &str {
        match self.backend {
            Backend::Databricks => &self.table,
            Backend::Sqlite => self.table.rsplit('.').next().unwrap_or(&self.table),
        }
    }

    pub fn wait_timeout_secs(&self) -> u64 {
        self.wait_timeout_secs.clamp(5, 50)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Env values like `DATABRICKS_WAREHOUSE_ID=1234` arrive as numbers; accept both.
fn deserialize_opt_string_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(serde::de::Error::custom(
            "expected a string or a number for a warehouse setting",
        )),
    }
}

fn default_database_url() -> String {
    "sqlite://currency.db".to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_wait_timeout_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn databricks() -> WarehouseConfig {
        WarehouseConfig {
            warehouse_id: Some("abc123".to_string()),
            host: Some("adb-1.azuredatabricks.net".to_string()),
            token: Some("dapi-test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn databricks_requires_warehouse_id() {
        let cfg = WarehouseConfig {
            warehouse_id: None,
            ..databricks()
        };
        let err = cfg.validate().expect_err("missing warehouse id");
        assert!(matches!(err, AdminError::Configuration(msg) if msg.contains("DATABRICKS_WAREHOUSE_ID")));
    }

    #[test]
    fn blank_warehouse_id_counts_as_missing() {
        let cfg = WarehouseConfig {
            warehouse_id: Some("   ".to_string()),
            ..databricks()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bare_host_gets_https_scheme() {
        let url = databricks().host_url().expect("valid host");
        assert_eq!(url.as_str(), "https://adb-1.azuredatabricks.net/");
        assert_eq!(
            url.join("api/2.0/sql/statements").expect("join").as_str(),
            "https://adb-1.azuredatabricks.net/api/2.0/sql/statements"
        );
    }

    #[test]
    fn service_principal_needs_both_halves() {
        let mut cfg = WarehouseConfig {
            token: None,
            client_id: Some("sp-id".to_string()),
            ..databricks()
        };
        assert!(cfg.credentials().is_err());

        cfg.client_secret = Some("sp-secret".to_string());
        assert!(matches!(
            cfg.credentials(),
            Ok(Credentials::ServicePrincipal { .. })
        ));
    }

    #[test]
    fn sqlite_uses_last_table_segment() {
        let cfg = WarehouseConfig::sqlite("sqlite::memory:");
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.table_name(), "country_currency_table");
    }

    #[test]
    fn wait_timeout_is_clamped_to_api_window() {
        let cfg = WarehouseConfig {
            wait_timeout_secs: 120,
            ..databricks()
        };
        assert_eq!(cfg.wait_timeout_secs(), 50);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", databricks());
        assert!(!rendered.contains("dapi-test"));
    }
}
