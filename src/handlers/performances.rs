//! Performance handlers: list across players, update and delete by id.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ValidJson, ValidQuery};
use crate::response::success_ok;
use crate::schemas::{Performance, PerformanceQuery, PerformanceUpdate};
use crate::service::{parse_id, CrudService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/v0/performances",
    tag = "performances",
    params(PerformanceQuery),
    responses(
        (status = 200, body = [Performance]),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn list_performances(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<PerformanceQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_performances(&state.pool, &filter).await?;
    Ok(success_ok(rows))
}

#[utoipa::path(
    patch,
    path = "/v0/performances/{performance_id}",
    tag = "performances",
    params(("performance_id" = i64, Path, description = "Performance identifier")),
    request_body = PerformanceUpdate,
    responses(
        (status = 200, body = Performance),
        (status = 404, body = ErrorBody),
        (status = 422, body = ErrorBody),
    )
)]
pub async fn update_performance(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidJson(body): ValidJson<PerformanceUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let performance_id = parse_id("performance_id", &id_str)?;
    let row = CrudService::update_performance(&state.pool, performance_id, body).await?;
    Ok(success_ok(row))
}

#[utoipa::path(
    delete,
    path = "/v0/performances/{performance_id}",
    tag = "performances",
    params(("performance_id" = i64, Path, description = "Performance identifier")),
    responses(
        (status = 204),
        (status = 404, body = ErrorBody),
    )
)]
pub async fn delete_performance(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let performance_id = parse_id("performance_id", &id_str)?;
    CrudService::delete_performance(&state.pool, performance_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
