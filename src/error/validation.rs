use crate::db::Column;
use thiserror::Error as ThisError;

/// Recoverable form errors; their message is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("All fields are required! {} is empty.", .0.label())]
    MissingField(Column),

    #[error("{} must be exactly three letters, got '{value}'.", .column.label())]
    InvalidCode { column: Column, value: String },

    #[error("{} must contain digits only, got '{value}'.", .column.label())]
    NotNumeric { column: Column, value: String },

    #[error("Country code {0} already exists!")]
    DuplicateKey(String),

    #[error("Please confirm deletion by checking the box above.")]
    DeleteNotConfirmed,
}

impl ValidationError {
    /// The offending column, when the error is about a single field.
    pub fn column(&self) -> Option<Column> {
        match self {
            ValidationError::MissingField(column)
            | ValidationError::InvalidCode { column, .. }
            | ValidationError::NotNumeric { column, .. } => Some(*column),
            ValidationError::DuplicateKey(_) => Some(Column::CountryCode),
            ValidationError::DeleteNotConfirmed => None,
        }
    }
}
