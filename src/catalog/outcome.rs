use crate::error::AdminError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Success,
    Error,
}

/// Which mutation an outcome describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
    Delete,
}

impl Operation {
    fn verb(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Operation::Add => "added",
            Operation::Update => "updated",
            Operation::Delete => "deleted",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// The single message shown once after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub status: OperationStatus,
    pub message: String,
}

impl OperationOutcome {
    pub fn success(operation: Operation) -> Self {
        Self {
            status: OperationStatus::Success,
            message: format!("Entry {} successfully!", operation.past_tense()),
        }
    }

    pub fn failure(operation: Operation, err: &AdminError) -> Self {
        let generic = format!("Failed to {} entry. Please try again.", operation.verb());
        Self {
            status: OperationStatus::Error,
            message: err.user_message(&generic),
        }
    }

    pub fn from_result<T>(operation: Operation, result: &Result<T, AdminError>) -> Self {
        match result {
            Ok(_) => Self::success(operation),
            Err(e) => Self::failure(operation, e),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}
