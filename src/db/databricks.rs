use crate::config::{Credentials, WarehouseConfig};
use crate::db::models::CountryCurrencyRecord;
use crate::db::warehouse::{Execution, Warehouse};
use crate::error::{AdminError, StorageError};
use async_trait::async_trait;
use currency_admin_schema::{
    ApiErrorBody, ResultData, StatementParameter, StatementRequest, StatementResponse,
    StatementState,
};
use oauth2::basic::BasicClient;
use oauth2::{ClientId, ClientSecret, Scope, TokenResponse, TokenUrl};
use reqwest::header::{CONNECTION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::debug;
use url::Url;

const STATEMENTS_PATH: &str = "api/2.0/sql/statements";
const TOKEN_PATH: &str = "oidc/v1/token";
const ALL_APIS_SCOPE: &str = "all-apis";
const AFFECTED_ROWS_COLUMN: &str = "num_affected_rows";

/// Remote Databricks SQL warehouse reached through the Statement Execution API.
pub struct DatabricksWarehouse {
    client: reqwest::Client,
    host: Url,
    warehouse_id: String,
    credentials: Credentials,
    wait_timeout_secs: u64,
}

impl DatabricksWarehouse {
    pub fn new(cfg: &WarehouseConfig) -> Result<Self, AdminError> {
        let host = cfg.host_url()?;
        let warehouse_id = cfg.warehouse_id()?.to_string();
        let credentials = cfg.credentials()?;

        // One request per statement: no keep-alive, no idle pool.
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        let client = reqwest::Client::builder()
            .user_agent(concat!("currency-admin/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .http1_only()
            .pool_max_idle_per_host(0)
            .default_headers(headers)
            .build()
            .map_err(|e| AdminError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            host,
            warehouse_id,
            credentials,
            wait_timeout_secs: cfg.wait_timeout_secs(),
        })
    }

    async fn bearer_token(&self) -> Result<String, StorageError> {
        match &self.credentials {
            Credentials::Token(token) => Ok(token.clone()),
            Credentials::ServicePrincipal {
                client_id,
                client_secret,
            } => {
                let token_url = TokenUrl::from_url(self.host.join(TOKEN_PATH)?);
                let oauth = BasicClient::new(ClientId::new(client_id.clone()))
                    .set_client_secret(ClientSecret::new(client_secret.clone()))
                    .set_token_uri(token_url);
                let token = oauth
                    .exchange_client_credentials()
                    .add_scope(Scope::new(ALL_APIS_SCOPE.to_string()))
                    .request_async(&self.client)
                    .await?;
                Ok(token.access_token().secret().to_string())
            }
        }
    }

    /// Submits one statement and returns its terminal, successful response.
    async fn submit(
        &self,
        statement: &str,
        params: &[String],
    ) -> Result<StatementResponse, StorageError> {
        let (statement, parameters) = bind_named(statement, params);
        let body = StatementRequest::inline(
            self.warehouse_id.as_str(),
            statement,
            self.wait_timeout_secs,
        )
        .with_parameters(parameters);

        let token = self.bearer_token().await?;
        let resp = self
            .client
            .post(self.host.join(STATEMENTS_PATH)?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(text);
            return Err(StorageError::Upstream { status, message });
        }

        let parsed: StatementResponse = resp
            .json()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))?;

        debug!(
            statement_id = %parsed.statement_id,
            state = parsed.status.state.as_str(),
            "Databricks statement finished"
        );

        if parsed.status.state != StatementState::Succeeded {
            let message = parsed
                .status
                .error
                .as_ref()
                .and_then(|e| e.message.clone())
                .unwrap_or_else(|| "no error message".to_string());
            return Err(StorageError::Statement {
                state: parsed.status.state.as_str().to_string(),
                message,
            });
        }
        Ok(parsed)
    }

    async fn fetch_chunk(&self, link: &str) -> Result<ResultData, StorageError> {
        let token = self.bearer_token().await?;
        let resp = self
            .client
            .get(self.host.join(link.trim_start_matches('/'))?)
            .bearer_auth(token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StorageError::Upstream { status, message });
        }
        resp.json()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Warehouse for DatabricksWarehouse {
    fn kind(&self) -> &'static str {
        "databricks"
    }

    async fn fetch_records(
        &self,
        statement: &str,
    ) -> Result<Vec<CountryCurrencyRecord>, StorageError> {
        let resp = self.submit(statement, &[]).await?;
        ensure_complete(&resp)?;
        let names: Vec<String> = resp.column_names().into_iter().map(str::to_string).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut records = Vec::new();
        let mut chunk = resp.result;
        while let Some(data) = chunk.take() {
            for row in data.data_array {
                records.push(
                    CountryCurrencyRecord::from_named_cells(&names, row)
                        .map_err(StorageError::Decode)?,
                );
            }
            if let Some(link) = data.next_chunk_internal_link {
                chunk = Some(self.fetch_chunk(&link).await?);
            }
        }
        Ok(records)
    }

    async fn execute(&self, statement: &str, params: &[String]) -> Result<Execution, StorageError> {
        let resp = self.submit(statement, params).await?;
        Ok(Execution {
            rows_affected: affected_rows(&resp),
        })
    }
}

/// Inline results stop at the API's byte limit; a partial table must not pass as the whole one.
fn ensure_complete(resp: &StatementResponse) -> Result<(), StorageError> {
    match resp.manifest.as_ref() {
        Some(manifest) if manifest.truncated => Err(StorageError::Decode(format!(
            "result truncated after {} rows",
            manifest.total_row_count.unwrap_or_default()
        ))),
        _ => Ok(()),
    }
}

/// Reads the DML row count Databricks reports as a one-row result.
fn affected_rows(resp: &StatementResponse) -> Option<u64> {
    let idx = resp
        .column_names()
        .iter()
        .position(|n| n.eq_ignore_ascii_case(AFFECTED_ROWS_COLUMN))?;
    resp.result
        .as_ref()?
        .data_array
        .first()?
        .get(idx)?
        .as_deref()?
        .parse()
        .ok()
}

/// Rewrites positional `?` markers to `:p1`, `:p2`, ... and pairs them with `params`.
///
/// Question marks inside single-quoted literals and backtick-quoted identifiers are kept.
pub(crate) fn bind_named(statement: &str, params: &[String]) -> (String, Vec<StatementParameter>) {
    let mut out = String::with_capacity(statement.len() + params.len() * 2);
    let mut quote: Option<char> = None;
    let mut next = 0usize;

    for c in statement.chars() {
        match (quote, c) {
            (None, '\'' | '`') => {
                quote = Some(c);
                out.push(c);
            }
            (Some(q), _) if c == q => {
                quote = None;
                out.push(c);
            }
            (None, '?') => {
                next += 1;
                out.push_str(&format!(":p{next}"));
            }
            _ => out.push(c),
        }
    }

    let parameters = params
        .iter()
        .enumerate()
        .map(|(i, value)| StatementParameter::string(format!("p{}", i + 1), value.as_str()))
        .collect();
    (out, parameters)
}
