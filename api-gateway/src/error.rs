//! Error handling for the API gateway

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use common::error::Error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::REQUEST_ID_HEADER;

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request ID for tracing, same value as the `x-request-id` header
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Common(#[from] Error),
}

impl ApiError {
    /// HTTP status and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        let ApiError::Common(error) = self;
        let status = if error.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let code = match error {
            Error::NotFound(_) => "customer_not_found",
            Error::AlreadyExists(_) => "customer_already_exists",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::InsufficientFunds(_) => "insufficient_funds",
            Error::ValidationError(_) => "validation_error",
            Error::Internal(_) => "internal_error",
            Error::Serialization(_) => "serialization_error",
        };

        (status, code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let error_response = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            request_id: None,
        };

        // The body is finished by `attach_request_id` once the id is known
        let mut response = (status, Json(error_response.clone())).into_response();
        response.extensions_mut().insert(error_response);
        response
    }
}

/// Stamp error bodies with the id assigned by `SetRequestIdLayer` and log them
pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;
    let Some(mut error_response) = response.extensions().get::<ErrorResponse>().cloned() else {
        return response;
    };

    let id = request_id.as_deref().unwrap_or("-");
    if response.status().is_server_error() {
        tracing::error!("API Error [{}]: {}", id, error_response.message);
    } else {
        tracing::warn!("API Error [{}]: {}", id, error_response.message);
    }

    error_response.request_id = request_id;
    let (parts, _) = response.into_parts();
    let body = Json(error_response).into_response().into_body();
    Response::from_parts(parts, body)
}
