//! Controller layer: validation, uniqueness checks and in-memory listing on top of the gateway.
//!
//! Every operation reloads what it needs; nothing is cached between calls.

pub mod form;
pub mod listing;
pub mod outcome;

pub use form::RecordForm;
pub use listing::{ListQuery, SortOrder, deserialize_or_default, filter_by_country, sort_records};
pub use outcome::{Operation, OperationOutcome, OperationStatus};

use crate::db::{Column, CountryCurrencyRecord, CurrencyGateway};
use crate::error::{AdminError, ValidationError};
use tracing::{info, warn};

pub struct Catalog {
    gateway: CurrencyGateway,
}

impl Catalog {
    pub fn new(gateway: CurrencyGateway) -> Self {
        Self { gateway }
    }

    /// The full table, in storage order.
    pub async fn load(&self) -> Result<Vec<CountryCurrencyRecord>, AdminError> {
        Ok(self.gateway.fetch_all().await?)
    }

    /// The full table, filtered and sorted in memory.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<CountryCurrencyRecord>, AdminError> {
        Ok(query.apply(self.load().await?))
    }

    /// Validates the form, rejects keys already present in a fresh load, then inserts.
    pub async fn create(&self, form: &RecordForm) -> Result<CountryCurrencyRecord, AdminError> {
        let result = self.try_create(form).await;
        log_result(Operation::Add, &result);
        result
    }

    async fn try_create(&self, form: &RecordForm) -> Result<CountryCurrencyRecord, AdminError> {
        let record = form.validate()?;
        let loaded = self.load().await?;
        ensure_absent(&loaded, &record.country_code)?;
        self.gateway.add(&record).await?;
        Ok(record)
    }

    /// Rewrites the record keyed by `original_country_code`. No-op edits are not detected.
    pub async fn update(
        &self,
        original_country_code: &str,
        form: &RecordForm,
    ) -> Result<CountryCurrencyRecord, AdminError> {
        let result = self.try_update(original_country_code, form).await;
        log_result(Operation::Update, &result);
        result
    }

    async fn try_update(
        &self,
        original_country_code: &str,
        form: &RecordForm,
    ) -> Result<CountryCurrencyRecord, AdminError> {
        let record = form.validate()?;
        self.gateway
            .update(original_country_code.trim(), &record)
            .await?;
        Ok(record)
    }

    /// Permanently removes the record. Requires an explicit confirmation.
    pub async fn delete(&self, country_code: &str, confirmed: bool) -> Result<(), AdminError> {
        let result = self.try_delete(country_code, confirmed).await;
        log_result(Operation::Delete, &result);
        result
    }

    async fn try_delete(&self, country_code: &str, confirmed: bool) -> Result<(), AdminError> {
        if !confirmed {
            return Err(ValidationError::DeleteNotConfirmed.into());
        }
        let country_code = country_code.trim();
        if country_code.is_empty() {
            return Err(ValidationError::MissingField(Column::CountryCode).into());
        }
        self.gateway.delete(country_code).await?;
        Ok(())
    }
}

fn ensure_absent(loaded: &[CountryCurrencyRecord], country_code: &str) -> Result<(), ValidationError> {
    if loaded.iter().any(|r| r.country_code == country_code) {
        return Err(ValidationError::DuplicateKey(country_code.to_string()));
    }
    Ok(())
}

fn log_result<T>(operation: Operation, result: &Result<T, AdminError>) {
    match result {
        Ok(_) => info!(%operation, "operation succeeded"),
        Err(AdminError::Validation(e)) => warn!(%operation, reason = %e, "operation rejected"),
        Err(e) => warn!(%operation, error = %e, "operation failed"),
    }
}
