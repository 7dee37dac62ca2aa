//! SQL text for the single reference table.
//!
//! Statements use positional `?` placeholders; backends that only bind named markers
//! rewrite them (see `databricks::bind_named`).

/// Fully-qualified table the admin service manages unless configured otherwise.
pub const DEFAULT_TABLE: &str = "test_project.country_code_to_currency.country_currency_table";

const COLUMN_LIST: &str =
    "country_code, country_number, country, currency_name, currency_code, currency_number";

/// Prepared SQL text for one table name.
#[derive(Debug, Clone)]
pub struct Statements {
    pub select_all: String,
    pub insert: String,
    pub update: String,
    pub delete: String,
}

impl Statements {
    pub fn for_table(table: &str) -> Self {
        Self {
            select_all: format!("SELECT {COLUMN_LIST} FROM {table}"),
            insert: format!(
                "INSERT INTO {table} ({COLUMN_LIST}) VALUES (?, ?, ?, ?, ?, ?)"
            ),
            update: format!(
                "UPDATE {table} SET country_code = ?, country_number = ?, country = ?, \
                 currency_name = ?, currency_code = ?, currency_number = ? \
                 WHERE country_code = ?"
            ),
            delete: format!("DELETE FROM {table} WHERE country_code = ?"),
        }
    }
}

/// SQLite DDL for local development. The warehouse table is created externally.
pub fn sqlite_init(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    country_code TEXT PRIMARY KEY NOT NULL,
    country_number TEXT NOT NULL,
    country TEXT NOT NULL,
    currency_name TEXT NOT NULL,
    currency_code TEXT NOT NULL,
    currency_number TEXT NOT NULL
)
"#
    )
}

/// True when `table` is one or more dot-separated `[A-Za-z0-9_]+` segments.
pub fn is_valid_table_name(table: &str) -> bool {
    !table.is_empty()
        && table.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
