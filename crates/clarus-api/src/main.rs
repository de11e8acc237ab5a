//! Clarus CLI and REST API entry point.
//!
//! Binary name: `clarus`
//!
//! Loads configuration, installs tracing, opens the store, then dispatches
//! to the requested command or starts the REST API server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = clarus_infra::config::load_config(&cli.config)
        .await
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    clarus_observe::tracing_setup::init_tracing(&config.logging, cli.log_directive())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let state = AppState::init(&config).await?;

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.http.host = host;
            }
            if let Some(port) = port {
                config.http.port = port;
            }
            serve(state.clone(), &config.http.bind_addr()).await
        }

        Commands::Sessions => cli::session::list_sessions(&state, cli.json).await,

        Commands::History { session_id } => {
            cli::session::show_history(&state, &session_id, cli.json).await
        }

        Commands::Check => check(&state, cli.json).await,
    };

    state.db_pool.close().await;
    clarus_observe::tracing_setup::shutdown_tracing();

    result
}

async fn serve(state: AppState, addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    println!(
        "  {} Clarus chat API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    if !state.assistant.is_online() {
        println!(
            "  {}",
            console::style("No LLM API key: /chat answers from local rules").yellow()
        );
    }
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    println!("\n  Server stopped.");
    Ok(())
}

async fn check(state: &AppState, json: bool) -> anyhow::Result<()> {
    let outcome = state.db_pool.health_check().await;

    if json {
        let check = serde_json::json!({
            "database": if outcome.is_ok() { "ok" } else { "unavailable" },
            "healthy": outcome.is_ok(),
        });
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        let mark = if outcome.is_ok() {
            console::style("✓").green()
        } else {
            console::style("✗").red()
        };
        println!();
        println!("  {mark} Database reachable");
        println!();
    }

    outcome.context("database health check failed")
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
