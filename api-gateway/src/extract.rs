//! Request extractors
//!
//! `ResolvedCustomer` performs identity resolution from the `cpf` header and
//! hands the customer to the handler as an argument. `ValidJson` and
//! `ValidQuery` turn axum's body/query rejections into the API error format.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use common::error::Error;
use common::model::customer::Customer;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the customer lookup key
pub const CPF_HEADER: &str = "cpf";

/// Customer matched by the `cpf` request header
#[derive(Debug, Clone)]
pub struct ResolvedCustomer(pub Customer);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ResolvedCustomer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let cpf = parts
            .headers
            .get(CPF_HEADER)
            .ok_or_else(|| Error::ValidationError(format!("Missing {} header", CPF_HEADER)))?
            .to_str()
            .map_err(|_| Error::ValidationError(format!("Header {} is not valid text", CPF_HEADER)))?;

        let customer = state.account_service.resolve_customer(cpf).await?;
        Ok(Self(customer))
    }
}

/// JSON body whose parse failures become `validation_error` responses
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| Error::ValidationError(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string whose parse failures become `validation_error` responses
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::ValidationError(rejection.body_text()))?;
        Ok(Self(value))
    }
}
