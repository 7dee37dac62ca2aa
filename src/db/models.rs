use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{cmp::Ordering, fmt, str::FromStr};

/// One row of the country/currency reference table, keyed by `country_code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct CountryCurrencyRecord {
    pub country_code: String,
    pub country_number: String,
    pub country: String,
    pub currency_name: String,
    pub currency_code: String,
    pub currency_number: String,
}

impl CountryCurrencyRecord {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::CountryCode => &self.country_code,
            Column::CountryNumber => &self.country_number,
            Column::Country => &self.country,
            Column::CurrencyName => &self.currency_name,
            Column::CurrencyCode => &self.currency_code,
            Column::CurrencyNumber => &self.currency_number,
        }
    }

    /// Statement parameters in storage column order.
    pub fn to_params(&self) -> Vec<String> {
        Column::ALL
            .iter()
            .map(|c| self.get(*c).to_string())
            .collect()
    }

    /// Builds a record from a positional row whose column names are given separately.
    ///
    /// Column lookup is case-insensitive; `NULL` cells become empty strings.
    pub fn from_named_cells(
        names: &[&str],
        mut cells: Vec<Option<String>>,
    ) -> Result<Self, String> {
        let mut take = |column: Column| -> Result<String, String> {
            let idx = names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(column.as_str()))
                .ok_or_else(|| format!("result is missing column `{column}`"))?;
            let cell = cells
                .get_mut(idx)
                .ok_or_else(|| format!("row is shorter than its schema at `{column}`"))?;
            Ok(cell.take().unwrap_or_default())
        };

        Ok(Self {
            country_code: take(Column::CountryCode)?,
            country_number: take(Column::CountryNumber)?,
            country: take(Column::Country)?,
            currency_name: take(Column::CurrencyName)?,
            currency_code: take(Column::CurrencyCode)?,
            currency_number: take(Column::CurrencyNumber)?,
        })
    }

    /// Natural ordering of two records under `column`.
    ///
    /// Numeric-string columns compare by value, with unparsable cells after all numbers.
    pub fn compare_by(&self, other: &Self, column: Column) -> Ordering {
        let (a, b) = (self.get(column), other.get(column));
        if column.is_numeric() {
            let key = |s: &str| {
                let parsed = s.trim().parse::<u64>();
                (parsed.is_err(), parsed.unwrap_or(0))
            };
            key(a).cmp(&key(b)).then_with(|| a.cmp(b))
        } else {
            a.cmp(b)
        }
    }
}

/// The six columns of the table, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    #[default]
    CountryCode,
    CountryNumber,
    Country,
    CurrencyName,
    CurrencyCode,
    CurrencyNumber,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::CountryCode,
        Column::CountryNumber,
        Column::Country,
        Column::CurrencyName,
        Column::CurrencyCode,
        Column::CurrencyNumber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::CountryCode => "country_code",
            Column::CountryNumber => "country_number",
            Column::Country => "country",
            Column::CurrencyName => "currency_name",
            Column::CurrencyCode => "currency_code",
            Column::CurrencyNumber => "currency_number",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::CountryCode => "Country Code (ISO Alpha-3)",
            Column::CountryNumber => "Country Number",
            Column::Country => "Country Name",
            Column::CurrencyName => "Currency Name",
            Column::CurrencyCode => "Currency Code",
            Column::CurrencyNumber => "Currency Number",
        }
    }

    /// Three-letter ISO codes.
    pub fn is_code(&self) -> bool {
        matches!(self, Column::CountryCode | Column::CurrencyCode)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::CountryNumber | Column::CurrencyNumber)
    }

    /// Columns stored uppercase.
    pub fn is_uppercase(&self) -> bool {
        matches!(
            self,
            Column::CountryCode | Column::Country | Column::CurrencyCode
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown column `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, number: &str) -> CountryCurrencyRecord {
        CountryCurrencyRecord {
            country_code: code.to_string(),
            country_number: number.to_string(),
            country: "X".to_string(),
            currency_name: "Y".to_string(),
            currency_code: "ZZZ".to_string(),
            currency_number: number.to_string(),
        }
    }

    #[test]
    fn numeric_columns_compare_by_value() {
        let a = record("AAA", "36");
        let b = record("BBB", "124");
        assert_eq!(a.compare_by(&b, Column::CountryNumber), Ordering::Less);
        // Lexicographically "36" > "124".
        assert_eq!(a.country_number.cmp(&b.country_number), Ordering::Greater);
    }

    #[test]
    fn unparsable_numbers_sort_after_numbers() {
        let a = record("AAA", "n/a");
        let b = record("BBB", "999");
        assert_eq!(a.compare_by(&b, Column::CurrencyNumber), Ordering::Greater);
    }

    #[test]
    fn from_named_cells_maps_by_name_not_position() {
        let names = [
            "currency_number",
            "COUNTRY_CODE",
            "country",
            "country_number",
            "currency_code",
            "currency_name",
        ];
        let cells = vec![
            Some("124".to_string()),
            Some("CAN".to_string()),
            Some("CANADA".to_string()),
            None,
            Some("CAD".to_string()),
            Some("Canadian Dollar".to_string()),
        ];

        let rec = CountryCurrencyRecord::from_named_cells(&names, cells).expect("decodes");
        assert_eq!(rec.country_code, "CAN");
        assert_eq!(rec.country_number, "");
        assert_eq!(rec.currency_name, "Canadian Dollar");
        assert_eq!(rec.currency_number, "124");
    }

    #[test]
    fn from_named_cells_reports_missing_column() {
        let err = CountryCurrencyRecord::from_named_cells(&["country_code"], vec![None])
            .expect_err("missing columns");
        assert!(err.contains("country_number"));
    }

    #[test]
    fn column_parses_wire_names() {
        assert_eq!("currency_code".parse::<Column>(), Ok(Column::CurrencyCode));
        assert!("currency".parse::<Column>().is_err());
    }
}
