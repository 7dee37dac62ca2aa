use crate::db::models::CountryCurrencyRecord;
use crate::db::schema::sqlite_init;
use crate::db::warehouse::{Execution, Warehouse};
use crate::error::StorageError;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::{str::FromStr, time::Duration};
use tracing::{info, warn};

/// Local SQLite file standing in for the remote warehouse.
///
/// Every call opens a fresh connection and closes it before returning.
pub struct SqliteWarehouse {
    options: SqliteConnectOptions,
}

impl SqliteWarehouse {
    /// Validates the URL and creates `table` if it does not exist yet.
    pub async fn open(database_url: &str, table: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let warehouse = Self { options };
        let mut conn = warehouse.connect().await?;
        let applied = sqlx::query(&sqlite_init(table)).execute(&mut conn).await;
        close(conn).await;
        applied?;

        info!(table, "SQLite warehouse ready");
        Ok(warehouse)
    }

    async fn connect(&self) -> Result<SqliteConnection, StorageError> {
        Ok(self.options.connect().await?)
    }
}

async fn close(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "failed to close SQLite connection cleanly");
    }
}

#[async_trait]
impl Warehouse for SqliteWarehouse {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_records(
        &self,
        statement: &str,
    ) -> Result<Vec<CountryCurrencyRecord>, StorageError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, CountryCurrencyRecord>(statement)
            .fetch_all(&mut conn)
            .await;
        close(conn).await;
        Ok(rows?)
    }

    async fn execute(&self, statement: &str, params: &[String]) -> Result<Execution, StorageError> {
        let mut conn = self.connect().await?;
        let mut query = sqlx::query(statement);
        for param in params {
            query = query.bind(param.clone());
        }
        let done = query.execute(&mut conn).await;
        close(conn).await;

        let done = done?;
        Ok(Execution {
            rows_affected: Some(done.rows_affected()),
        })
    }
}
