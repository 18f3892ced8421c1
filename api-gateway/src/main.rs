//! Banking API server

use std::net::SocketAddr;
use std::sync::Arc;

use account_service::{AccountService, AccountServiceConfig};
use api_gateway::config::AppConfig;
use api_gateway::{create_router, AppState};
use clap::Parser;
use common::error::IntoError;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Banking API server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Listening address, overrides HOST and PORT
    #[arg(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();
    let config = AppConfig::new();

    // Debug level when DEBUG=1 env var is set
    let debug_enabled = std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false);
    let log_level = if debug_enabled { Level::DEBUG } else { Level::INFO };
    init_tracing(log_level, config.json_logs)?;
    debug!("Debug logging enabled");

    let service_config = AccountServiceConfig::from_env();
    info!("Transaction logging: {}", service_config.transaction_logging);

    let account_service = Arc::new(AccountService::with_config(&service_config));
    let state = Arc::new(AppState::new(account_service));
    let app = create_router(state, log_level);

    let addr: SocketAddr = args
        .addr
        .unwrap_or_else(|| config.addr())
        .parse()
        .map_err(|e: std::net::AddrParseError| e.into_error("Invalid listening address"))?;
    let listener = TcpListener::bind(addr).await?;
    info!("-> Server running on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(log_level: Level, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse(format!(
            "tower_http={level},api_gateway={level},account_service={level}",
            level = log_level
        ))?;

    let builder = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
