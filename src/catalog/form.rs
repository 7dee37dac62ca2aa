use crate::db::{Column, CountryCurrencyRecord};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Raw six-field form as submitted by the browser or the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordForm {
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub country_number: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency_name: String,
    #[serde(default)]
    pub currency_code: String,
    #[serde(default)]
    pub currency_number: String,
}

impl RecordForm {
    /// Pre-fills a form from a stored record.
    pub fn from_record(record: &CountryCurrencyRecord) -> Self {
        Self {
            country_code: record.country_code.clone(),
            country_number: record.country_number.clone(),
            country: record.country.clone(),
            currency_name: record.currency_name.clone(),
            currency_code: record.currency_code.clone(),
            currency_number: record.currency_number.clone(),
        }
    }

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

    /// Normalizes and checks every field, in column order.
    ///
    /// The first failing field wins: a missing value is reported before a malformed one.
    pub fn validate(&self) -> Result<CountryCurrencyRecord, ValidationError> {
        let mut values: [String; 6] = Default::default();
        for (slot, column) in values.iter_mut().zip(Column::ALL) {
            *slot = normalize(column, self.get(column))?;
        }
        let [
            country_code,
            country_number,
            country,
            currency_name,
            currency_code,
            currency_number,
        ] = values;

        Ok(CountryCurrencyRecord {
            country_code,
            country_number,
            country,
            currency_name,
            currency_code,
            currency_number,
        })
    }
}

fn normalize(column: Column, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(column));
    }

    let value = if column.is_uppercase() {
        trimmed.to_uppercase()
    } else {
        trimmed.to_string()
    };

    if column.is_code() && !(value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())) {
        return Err(ValidationError::InvalidCode { column, value });
    }
    if column.is_numeric() && !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotNumeric { column, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canada() -> RecordForm {
        RecordForm {
            country_code: "can".to_string(),
            country_number: "124".to_string(),
            country: " Canada ".to_string(),
            currency_name: "Canadian Dollar".to_string(),
            currency_code: "cad".to_string(),
            currency_number: "124".to_string(),
        }
    }

    fn with_column(mut form: RecordForm, column: Column, value: &str) -> RecordForm {
        let slot = match column {
            Column::CountryCode => &mut form.country_code,
            Column::CountryNumber => &mut form.country_number,
            Column::Country => &mut form.country,
            Column::CurrencyName => &mut form.currency_name,
            Column::CurrencyCode => &mut form.currency_code,
            Column::CurrencyNumber => &mut form.currency_number,
        };
        *slot = value.to_string();
        form
    }

    #[test]
    fn uppercases_codes_and_country_only() {
        let rec = canada().validate().expect("valid form");
        assert_eq!(rec.country_code, "CAN");
        assert_eq!(rec.country, "CANADA");
        assert_eq!(rec.currency_code, "CAD");
        assert_eq!(rec.currency_name, "Canadian Dollar");
        assert_eq!(rec.country_number, "124");
    }

    #[test]
    fn each_empty_field_is_reported_individually() {
        for column in Column::ALL {
            let err = with_column(canada(), column, "")
                .validate()
                .expect_err("empty field must fail");
            assert_eq!(err, ValidationError::MissingField(column));
        }
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let err = with_column(canada(), Column::CurrencyName, "   ")
            .validate()
            .expect_err("blank field must fail");
        assert_eq!(err, ValidationError::MissingField(Column::CurrencyName));
    }

    #[test]
    fn codes_must_be_three_letters() {
        let err = with_column(canada(), Column::CountryCode, "CA")
            .validate()
            .expect_err("short code");
        assert!(matches!(
            err,
            ValidationError::InvalidCode { column: Column::CountryCode, .. }
        ));

        let err = with_column(canada(), Column::CurrencyCode, "C4D")
            .validate()
            .expect_err("digit in code");
        assert_eq!(err.column(), Some(Column::CurrencyCode));
    }

    #[test]
    fn numbers_must_be_digits() {
        let err = with_column(canada(), Column::CurrencyNumber, "12a")
            .validate()
            .expect_err("non-numeric");
        assert_eq!(
            err,
            ValidationError::NotNumeric {
                column: Column::CurrencyNumber,
                value: "12a".to_string()
            }
        );
    }

    #[test]
    fn form_round_trips_a_stored_record() {
        let rec = canada().validate().expect("valid form");
        assert_eq!(RecordForm::from_record(&rec).validate(), Ok(rec));
    }
}
