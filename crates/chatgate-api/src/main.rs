//! Chat gateway entry point.
//!
//! Binary name: `chatgate`
//!
//! Loads configuration from the environment, wires up storage, cache, and
//! the model client, then serves the HTTP API until Ctrl+C or SIGTERM.

mod http;
mod state;

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chatgate_types::config::GatewayConfig;
use state::AppState;

#[derive(Parser)]
#[command(name = "chatgate", version, about = "HTTP gateway in front of an LLM chat provider")]
struct Cli {
    /// Host to bind to.
    #[arg(long, default_value = "0.0.0.0", env = "CHATGATE_HOST")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, default_value = "8000", env = "CHATGATE_PORT")]
    port: u16,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,chatgate=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Missing or malformed environment is fatal at startup, not per request.
    let config = GatewayConfig::from_env().context("invalid gateway configuration")?;
    let state = AppState::init(&config).await?;

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, model = %config.model.model, "chat gateway listening");

    let router = http::router::build_router(state);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or (on unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
