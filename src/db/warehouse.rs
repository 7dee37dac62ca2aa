use crate::db::models::CountryCurrencyRecord;
use crate::error::StorageError;
use async_trait::async_trait;

/// Result of a single mutation statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Execution {
    /// Rows touched, when the backend reports it.
    pub rows_affected: Option<u64>,
}

/// A SQL backend that runs exactly one statement per call.
///
/// Implementations open their connection (or HTTP call) inside each method and release it
/// before returning; nothing is pooled or retried.
#[async_trait]
pub trait Warehouse: Send + Sync + 'static {
    /// Short backend name used in logs.
    fn kind(&self) -> &'static str;

    /// Runs a read statement and decodes every row as a record, in storage order.
    async fn fetch_records(&self, statement: &str)
    -> Result<Vec<CountryCurrencyRecord>, StorageError>;

    /// Runs a write statement with positional string parameters.
    async fn execute(&self, statement: &str, params: &[String])
    -> Result<Execution, StorageError>;
}
