//! Wire types for the Databricks SQL Statement Execution API.
//!
//! Only the subset the admin service needs is modelled; unknown fields are kept in
//! `extra` maps where forward compatibility matters.

pub mod statement;

pub use statement::{
    ApiErrorBody, ColumnInfo, Disposition, OnWaitTimeout, ResultData, ResultFormat,
    ResultManifest, ResultSchema, ServiceError, StatementParameter, StatementRequest,
    StatementResponse, StatementState, StatementStatus,
};
