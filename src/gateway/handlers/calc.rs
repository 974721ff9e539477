//! Calculation handlers

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};

use crate::auth::Claims;
use crate::calculator::{self, Operation};
use crate::error::ApiError;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, CalculateQuery, CalculateRequest, CalculationData};
use crate::oplog::CalculationRecord;

/// Evaluate a calculation
///
/// POST /calculate
#[utoipa::path(
    post,
    path = "/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Calculation result", body = ApiResponse<CalculationData>),
        (status = 400, description = "Domain error, unknown operation or malformed input"),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Calculator"
)]
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CalculationData>>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let op: Operation = req.operation.parse()?;
    run(&state, &claims, op, req.operands)
}

/// Evaluate a calculation from query parameters
///
/// GET /calculate/{operation}?x=..&y=..
#[utoipa::path(
    get,
    path = "/calculate/{operation}",
    params(
        ("operation" = String, Path, description = "Operation name, e.g. `sqrt`"),
        CalculateQuery
    ),
    responses(
        (status = 200, description = "Calculation result", body = ApiResponse<CalculationData>),
        (status = 400, description = "Domain error, unknown operation or malformed input"),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    security(("bearer_auth" = [])),
    tag = "Calculator"
)]
pub async fn calculate_query(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    operation: Result<Path<String>, PathRejection>,
    query: Result<Query<CalculateQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CalculationData>>, ApiError> {
    let Path(operation) = operation.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let op: Operation = operation.parse()?;
    let operands = query
        .operands()
        .ok_or_else(|| ApiError::InvalidInput("y given without x".to_string()))?;
    run(&state, &claims, op, operands)
}

/// Evaluate, then log only on success.
fn run(
    state: &AppState,
    claims: &Claims,
    op: Operation,
    operands: Vec<f64>,
) -> Result<Json<ApiResponse<CalculationData>>, ApiError> {
    let result = calculator::evaluate(op, &operands)?;

    state.oplog.record(CalculationRecord::new(
        claims.sub.clone(),
        op,
        operands.clone(),
        result,
    ));

    Ok(Json(ApiResponse::success(CalculationData {
        operation: op,
        operands,
        result,
    })))
}
