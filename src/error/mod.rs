mod admin;
mod storage;
mod validation;

pub use admin::{AdminError, ApiErrorBody, ApiErrorObject};
pub use storage::StorageError;
pub use validation::ValidationError;
