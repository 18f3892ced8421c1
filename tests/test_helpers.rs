// File: tests/test_helpers.rs

use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig};
use api_gateway::{create_router, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use tracing::Level;

/// In-process server with its own empty store
pub struct TestServer {
    app: Router,
}

impl TestServer {
    pub fn new() -> Self {
        let service = Arc::new(AccountService::with_config(&AccountServiceConfig::new(true)));
        Self {
            app: create_router(Arc::new(AppState::new(service)), Level::INFO),
        }
    }

    /// Send a request, optionally with a cpf header and JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        cpf: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cpf) = cpf {
            builder = builder.header("cpf", cpf);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }
}

/// Parse a decimal from a JSON string or number
pub fn decimal(value: &Value) -> Decimal {
    serde_json::from_value(value.clone()).unwrap()
}
