//! Statement and balance API handlers

use std::sync::Arc;

use axum::extract::State;
use chrono::NaiveDate;
use common::model::customer::{Balance, Operation, Statement};
use serde::Deserialize;

use crate::api::response::{ApiListResponse, ApiResponse, ResponseMetadata};
use crate::error::ErrorResponse;
use crate::extract::{ResolvedCustomer, ValidQuery};
use crate::AppState;

/// Statement-by-date query
#[derive(Debug, Deserialize)]
pub struct StatementDateQuery {
    /// Calendar date in `YYYY-MM-DD` form
    pub date: NaiveDate,
}

/// Get the full statement and balance
#[utoipa::path(
    get,
    path = "/statement",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    responses(
        (status = 200, description = "Statement with computed balance", body = Statement),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "statement"
)]
pub async fn get_statement(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
) -> ApiResponse<Statement> {
    ApiResponse::new(state.account_service.statement(&customer))
}

/// Get the operations recorded on one calendar date
#[utoipa::path(
    get,
    path = "/statement/date",
    params(
        ("cpf" = String, Header, description = "Customer cpf"),
        ("date" = String, Query, description = "Calendar date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Operations on the given date", body = [Operation]),
        (status = 400, description = "Customer not found or date is invalid", body = ErrorResponse)
    ),
    tag = "statement"
)]
pub async fn get_statement_by_date(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
    ValidQuery(query): ValidQuery<StatementDateQuery>,
) -> ApiListResponse<Operation> {
    let operations = state.account_service.statement_by_date(&customer, query.date);

    let meta = ResponseMetadata {
        request_id: None,
        extra: Some(serde_json::json!({
            "date": query.date,
            "count": operations.len(),
        })),
    };

    ApiListResponse::with_metadata(operations, meta)
}

/// Get the current balance
#[utoipa::path(
    get,
    path = "/balance",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    responses(
        (status = 200, description = "Computed balance", body = Balance),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "statement"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
) -> ApiResponse<Balance> {
    ApiResponse::new(state.account_service.balance(&customer))
}
