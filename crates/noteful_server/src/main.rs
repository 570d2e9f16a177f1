//! Noteful server entry point.
//!
//! # Responsibility
//! - Read configuration, start logging, open the store.
//! - Serve the HTTP router until Ctrl-C, then close the store.

mod config;

use clap::Parser;
use config::Config;
use log::{error, info};
use noteful_core::{default_log_level, init_logging, Database};
use noteful_http::{router, AppState};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, config.log_dir.as_deref()) {
        eprintln!("noteful: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=server status=error error={err}");
            eprintln!("noteful: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), String> {
    let addr = config.socket_addr()?;
    let db = if config.uses_memory_database() {
        Database::open_in_memory()
    } else {
        Database::open(&config.database)
    }
    .map_err(|err| format!("failed to open database `{}`: {err}", config.database))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind {addr}: {err}"))?;
    info!(
        "event=app_start module=server status=ok addr={addr} database={} version={}",
        config.database,
        noteful_core::core_version()
    );

    let served = axum::serve(listener, router(AppState::new(db.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| format!("server error: {err}"));

    db.close()
        .map_err(|err| format!("failed to close database: {err}"))?;
    info!("event=app_stop module=server status=ok");
    served
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=signal_listen module=server status=error error={err}");
    }
}
