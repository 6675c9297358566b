//! Startup helpers for the nutriplan server.
//!
//! One mode only: load configuration from the environment, build the Gemini
//! client, serve until shutdown.

use std::process::ExitCode;

use anyhow::Context;

use crate::config::ServerConfig;
use crate::server::{self, AppState};

/// Run the server (used by the `nutriplan-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting nutriplan-server v{}", env!("CARGO_PKG_VERSION"));

    match try_run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Server error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn try_run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("failed to load configuration")?;
    tracing::info!(
        api_key_set = !config.gemini_api_key.trim().is_empty(),
        "Gemini API key status"
    );
    config.validate().context("invalid configuration")?;
    tracing::info!(
        port = config.port,
        plan_model = %config.plan_model,
        chat_model = %config.chat_model,
        "configuration loaded"
    );

    let port = config.port;
    let state = AppState::new(config).context("failed to create state")?;

    let rt = tokio::runtime::Runtime::new().context("failed to create runtime")?;
    rt.block_on(server::run_server(state, port))
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(())
}
