//! HTTP surface for the banking API

pub mod api;
pub mod config;
pub mod error;
pub mod extract;

use std::sync::Arc;

use account_service::AccountService;
use axum::{
    http::{HeaderName, Method},
    middleware,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    account::{create_account, delete_account, get_account, update_account},
    statement::{get_balance, get_statement, get_statement_by_date},
    system::server_time,
    transaction::{deposit, withdraw},
};

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::system::server_time,
        // Account routes
        api::account::create_account,
        api::account::get_account,
        api::account::update_account,
        api::account::delete_account,
        // Transaction routes
        api::transaction::deposit,
        api::transaction::withdraw,
        // Statement routes
        api::statement::get_statement,
        api::statement::get_statement_by_date,
        api::statement::get_balance,
    ),
    components(
        schemas(
            api::account::CreateAccountRequest,
            api::account::UpdateAccountRequest,
            api::account::DeletedAccount,
            api::transaction::TransactionRequest,
            api::system::ServerTime,
            common::model::customer::Customer,
            common::model::customer::Operation,
            common::model::customer::OperationType,
            common::model::customer::Statement,
            common::model::customer::Balance,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "Server status"),
        (name = "account", description = "Customer account lifecycle"),
        (name = "transaction", description = "Deposits and withdrawals"),
        (name = "statement", description = "Statement and balance queries")
    ),
    info(
        title = "FinAPI",
        version = "1.0.0",
        description = "In-memory banking API: customer accounts, deposits, withdrawals and statements"
    )
)]
pub struct ApiDoc;

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
    /// Server start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create app state starting now
    pub fn new(account_service: Arc<AccountService>) -> Self {
        Self {
            account_service,
            started_at: Utc::now(),
        }
    }
}

/// Build the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>, log_level: Level) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(cors);

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", get(server_time))
        .route(
            "/account",
            post(create_account)
                .get(get_account)
                .put(update_account)
                .delete(delete_account),
        )
        .route("/statement", get(get_statement))
        .route("/statement/date", get(get_statement_by_date))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/balance", get(get_balance))
        .merge(swagger_ui)
        .layer(middleware::from_fn(error::attach_request_id))
        .layer(layers)
        .with_state(state)
}
