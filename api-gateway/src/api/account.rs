//! Account API handlers
//!
//! Handles endpoints related to the customer account lifecycle:
//! - Create account
//! - Get account details
//! - Rename account
//! - Delete account

use std::sync::Arc;

use axum::{extract::State, http::StatusCode};
use common::model::customer::Customer;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::response::ApiResponse;
use crate::error::{ApiError, ErrorResponse};
use crate::extract::{ResolvedCustomer, ValidJson};
use crate::AppState;

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Caller-chosen lookup key, unique among customers
    pub cpf: String,
    /// Display name
    pub name: String,
}

/// Update account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
    /// New display name
    pub name: String,
}

/// Confirmation returned after an account is deleted
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedAccount {
    /// ID of the removed customer
    pub id: Uuid,
    /// cpf of the removed customer
    pub cpf: String,
    /// Always true
    pub deleted: bool,
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/account",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account successfully created", body = Customer),
        (status = 400, description = "cpf already exists or input is blank", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<CreateAccountRequest>,
) -> Result<(StatusCode, ApiResponse<Customer>), ApiError> {
    let customer = state
        .account_service
        .create_account(&request.cpf, &request.name)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(customer)))
}

/// Get the account matching the cpf header
#[utoipa::path(
    get,
    path = "/account",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully", body = Customer),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn get_account(ResolvedCustomer(customer): ResolvedCustomer) -> ApiResponse<Customer> {
    ApiResponse::new(customer)
}

/// Rename the account matching the cpf header
#[utoipa::path(
    put,
    path = "/account",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = Customer),
        (status = 400, description = "Customer not found or name is blank", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn update_account(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
    ValidJson(request): ValidJson<UpdateAccountRequest>,
) -> Result<ApiResponse<Customer>, ApiError> {
    let updated = state
        .account_service
        .update_account(&customer, &request.name)
        .await?;

    Ok(ApiResponse::new(updated))
}

/// Delete the account matching the cpf header
#[utoipa::path(
    delete,
    path = "/account",
    params(
        ("cpf" = String, Header, description = "Customer cpf")
    ),
    responses(
        (status = 200, description = "Account deleted", body = DeletedAccount),
        (status = 400, description = "Customer not found", body = ErrorResponse)
    ),
    tag = "account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    ResolvedCustomer(customer): ResolvedCustomer,
) -> Result<ApiResponse<DeletedAccount>, ApiError> {
    let removed = state.account_service.delete_account(&customer).await?;

    Ok(ApiResponse::new(DeletedAccount {
        id: removed.id,
        cpf: removed.cpf,
        deleted: true,
    }))
}
