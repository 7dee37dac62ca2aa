//! Data access: the record model, SQL text, and the warehouse backends behind the gateway.
//!
//! Layout:
//! - `models.rs`: the record struct and its column enum
//! - `schema.rs`: SQL statements and the local SQLite DDL
//! - `warehouse.rs`: the one-statement-per-call backend trait
//! - `sqlite.rs` / `databricks.rs`: backends
//! - `gateway.rs`: CRUD operations on top of a backend

pub mod databricks;
pub mod gateway;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod warehouse;

pub use databricks::DatabricksWarehouse;
pub use gateway::CurrencyGateway;
pub use models::{Column, CountryCurrencyRecord};
pub use schema::DEFAULT_TABLE;
pub use sqlite::SqliteWarehouse;
pub use warehouse::{Execution, Warehouse};

use crate::config::{Backend, WarehouseConfig};
use crate::error::AdminError;
use std::sync::Arc;
use tracing::info;

/// Builds the configured backend and wraps it in a gateway.
pub async fn open_gateway(cfg: &WarehouseConfig) -> Result<CurrencyGateway, AdminError> {
    let table = cfg.table_name();
    let warehouse: Arc<dyn Warehouse> = match cfg.backend {
        Backend::Databricks => Arc::new(DatabricksWarehouse::new(cfg)?),
        Backend::Sqlite => Arc::new(SqliteWarehouse::open(&cfg.database_url, table).await?),
    };
    info!(backend = warehouse.kind(), table, "Warehouse gateway configured");
    Ok(CurrencyGateway::new(warehouse, table))
}
