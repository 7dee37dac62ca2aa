mod request;
mod response;

pub use request::{Disposition, OnWaitTimeout, ResultFormat, StatementParameter, StatementRequest};
pub use response::{
    ApiErrorBody, ColumnInfo, ResultData, ResultManifest, ResultSchema, ServiceError,
    StatementResponse, StatementState, StatementStatus,
};
