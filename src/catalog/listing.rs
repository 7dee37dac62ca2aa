use crate::db::{Column, CountryCurrencyRecord};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order `{other}`")),
        }
    }
}

/// Query-string values parse leniently: an unknown value falls back to the default.
pub fn deserialize_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}

/// In-memory filter and sort applied to the freshly loaded table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of `country`; empty keeps every record.
    #[serde(default)]
    pub q: String,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub sort: Column,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub order: SortOrder,
}

impl ListQuery {
    pub fn apply(&self, records: Vec<CountryCurrencyRecord>) -> Vec<CountryCurrencyRecord> {
        let mut out = filter_by_country(records, &self.q);
        sort_records(&mut out, self.sort, self.order);
        out
    }
}

pub fn filter_by_country(
    records: Vec<CountryCurrencyRecord>,
    needle: &str,
) -> Vec<CountryCurrencyRecord> {
    if needle.is_empty() {
        return records;
    }
    let needle = needle.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.country.to_lowercase().contains(&needle))
        .collect()
}

/// Tie order is unspecified.
pub fn sort_records(records: &mut [CountryCurrencyRecord], column: Column, order: SortOrder) {
    match order {
        SortOrder::Asc => records.sort_by(|a, b| a.compare_by(b, column)),
        SortOrder::Desc => records.sort_by(|a, b| b.compare_by(a, column)),
    }
}
