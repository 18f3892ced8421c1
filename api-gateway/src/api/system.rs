//! Server status handler

use std::sync::Arc;

use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::response::ApiResponse;
use crate::AppState;

/// Current server time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerTime {
    /// When the server started
    pub started_at: DateTime<Utc>,
    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
    /// Seconds since start
    pub uptime_seconds: i64,
}

/// Report the current server time
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Current server timestamp", body = ServerTime)
    ),
    tag = "system"
)]
pub async fn server_time(State(state): State<Arc<AppState>>) -> ApiResponse<ServerTime> {
    let now = Utc::now();

    ApiResponse::new(ServerTime {
        started_at: state.started_at,
        timestamp: now,
        uptime_seconds: (now - state.started_at).num_seconds(),
    })
}
