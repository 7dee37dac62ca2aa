use crate::db::models::CountryCurrencyRecord;
use crate::db::schema::Statements;
use crate::db::warehouse::{Execution, Warehouse};
use crate::error::StorageError;
use std::sync::Arc;
use tracing::{debug, error};

/// Data access gateway for the country/currency table.
///
/// Holds no connection state: each method issues exactly one statement through the
/// warehouse, which opens and closes its own connection.
#[derive(Clone)]
pub struct CurrencyGateway {
    warehouse: Arc<dyn Warehouse>,
    statements: Arc<Statements>,
}

impl CurrencyGateway {
    pub fn new(warehouse: Arc<dyn Warehouse>, table: &str) -> Self {
        Self {
            warehouse,
            statements: Arc::new(Statements::for_table(table)),
        }
    }

    /// Every row, in the order storage returns them.
    pub async fn fetch_all(&self) -> Result<Vec<CountryCurrencyRecord>, StorageError> {
        let statement = self.statements.select_all.as_str();
        debug!(backend = self.warehouse.kind(), statement, "fetch_all");
        self.warehouse
            .fetch_records(statement)
            .await
            .inspect_err(|e| {
                error!(backend = self.warehouse.kind(), error = %e, "fetch_all failed");
            })
    }

    /// Runs one parameterized write. Failures are logged here and returned typed.
    pub async fn execute(
        &self,
        statement: &str,
        params: &[String],
    ) -> Result<Execution, StorageError> {
        debug!(
            backend = self.warehouse.kind(),
            statement,
            params = params.len(),
            "execute"
        );
        self.warehouse
            .execute(statement, params)
            .await
            .inspect_err(|e| {
                error!(backend = self.warehouse.kind(), error = %e, "Database error");
            })
    }

    pub async fn add(&self, record: &CountryCurrencyRecord) -> Result<Execution, StorageError> {
        self.execute(&self.statements.insert, &record.to_params())
            .await
            .map_err(|e| conflict_as_duplicate(e, &record.country_code))
    }

    /// Rewrites the row currently keyed by `original_country_code`, which may change the key.
    pub async fn update(
        &self,
        original_country_code: &str,
        record: &CountryCurrencyRecord,
    ) -> Result<Execution, StorageError> {
        let mut params = record.to_params();
        params.push(original_country_code.to_string());

        let done = self
            .execute(&self.statements.update, &params)
            .await
            .map_err(|e| conflict_as_duplicate(e, &record.country_code))?;
        require_rows(done, original_country_code)
    }

    pub async fn delete(&self, country_code: &str) -> Result<Execution, StorageError> {
        let done = self
            .execute(&self.statements.delete, &[country_code.to_string()])
            .await?;
        require_rows(done, country_code)
    }
}

fn conflict_as_duplicate(err: StorageError, country_code: &str) -> StorageError {
    if err.is_unique_violation() {
        StorageError::DuplicateKey(country_code.to_string())
    } else {
        err
    }
}

/// A reported count of zero means the key was not present.
fn require_rows(done: Execution, country_code: &str) -> Result<Execution, StorageError> {
    match done.rows_affected {
        Some(0) => Err(StorageError::NotFound(country_code.to_string())),
        _ => Ok(done),
    }
}
