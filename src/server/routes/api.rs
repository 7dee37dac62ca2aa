use crate::catalog::{ListQuery, Operation, OperationOutcome, RecordForm};
use crate::db::CountryCurrencyRecord;
use crate::error::AdminError;
use crate::server::router::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// GET /api/records
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CountryCurrencyRecord>>, AdminError> {
    Ok(Json(state.catalog.list(&query).await?))
}

/// POST /api/records
pub async fn create_record(
    State(state): State<AppState>,
    Json(form): Json<RecordForm>,
) -> Result<(StatusCode, Json<OperationOutcome>), AdminError> {
    state.catalog.create(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(OperationOutcome::success(Operation::Add)),
    ))
}

/// PUT /api/records/{original_country_code}
pub async fn update_record(
    State(state): State<AppState>,
    Path(original_country_code): Path<String>,
    Json(form): Json<RecordForm>,
) -> Result<Json<OperationOutcome>, AdminError> {
    state.catalog.update(&original_country_code, &form).await?;
    Ok(Json(OperationOutcome::success(Operation::Update)))
}

/// DELETE /api/records/{country_code}
///
/// The request itself is the confirmation.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<OperationOutcome>, AdminError> {
    state.catalog.delete(&country_code, true).await?;
    Ok(Json(OperationOutcome::success(Operation::Delete)))
}
