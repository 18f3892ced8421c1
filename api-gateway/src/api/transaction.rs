//! Transaction API handlers
//!
//! Deposits and withdrawals on the account matching the cpf header. The
//! customer is resolved before the body is read, so an unknown cpf is
//! reported even when the amount is invalid.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use common::decimal::Amount;
use common::model::customer::Operation;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::response::ApiResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::extract::{ResolvedCustomer, ValidJson};
use crate::AppState;

/// Deposit or withdrawal request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransactionRequest {
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Strictly positive amount
    #[schema(value_type = f64)]
    pub amount: Amount,
}

/// Deposit funds into an account
#[utoipa::path(
    post,
    path = "/deposit",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Credit recorded", body = Operation),
        (status = 400, description = "Customer not found or amount not positive", body = ErrorResponse)
    ),
    tag = "transaction"
)]
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
    ValidJson(request): ValidJson<TransactionRequest>,
) -> Result<(StatusCode, ApiResponse<Operation>), ApiError> {
    let operation = state
        .account_service
        .deposit(&customer, &request.description, request.amount)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(operation)))
}

/// Withdraw funds from an account
#[utoipa::path(
    post,
    path = "/withdraw",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    request_body = TransactionRequest,
    responses(
        (status = 201, description = "Debit recorded", body = Operation),
        (status = 400, description = "Customer not found, amount not positive or insufficient funds", body = ErrorResponse)
    ),
    tag = "transaction"
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
    ValidJson(request): ValidJson<TransactionRequest>,
) -> Result<(StatusCode, ApiResponse<Operation>), ApiError> {
    let operation = state
        .account_service
        .withdraw(&customer, &request.description, request.amount)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(operation)))
}
