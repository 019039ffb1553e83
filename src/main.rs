//! algo-rewards-tracker entry point.
//!
//! Parses the command line, loads configuration from the environment and
//! runs the selected command.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use algo_rewards_tracker::api;
use algo_rewards_tracker::app_state::AppState;
use algo_rewards_tracker::cli::{Cli, Command};
use algo_rewards_tracker::config::TrackerConfig;
use algo_rewards_tracker::domain::EventBus;
use algo_rewards_tracker::persistence::{MemoryPersistence, RewardsStore};
use algo_rewards_tracker::render::report::history_chart;
use algo_rewards_tracker::render::{participation_report, rewards_report};
use algo_rewards_tracker::service::{RewardsService, Scheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Arc::new(TrackerConfig::from_env()?);
    let command = cli.command();
    tracing::info!(address = %config.address, ?command, "starting algo-rewards-tracker");

    // Reports only read the node; they never touch the database.
    let store = match command {
        Command::Serve | Command::Collect => RewardsStore::from_config(&config).await?,
        Command::Report { .. } | Command::Status => MemoryPersistence::new().into(),
    };
    let event_bus = EventBus::new(config.event_bus_capacity);
    let service = Arc::new(RewardsService::new(Arc::clone(&config), store, event_bus)?);

    match command {
        Command::Serve => serve(service).await,
        Command::Collect => {
            let summary = service.collect().await?;
            tracing::info!(
                run_id = %summary.run_id,
                rewards_found = summary.rewards_found,
                rewards_upserted = summary.rewards_upserted,
                cumulative_rewards = summary.history.cumulative_rewards,
                "collection finished"
            );
            Ok(())
        }
        Command::Report { chart } => {
            let report = service.report().await;
            println!("{}", rewards_report(&report));
            if let Some(path) = chart {
                tokio::fs::write(&path, history_chart(&report.history))
                    .await
                    .with_context(|| format!("writing chart to {}", path.display()))?;
                tracing::info!(path = %path.display(), "history chart written");
            }
            Ok(())
        }
        Command::Status => {
            let status = service.participation().await?;
            println!("{}", participation_report(&config.address, &status));
            Ok(())
        }
    }
}

/// Runs the scheduler and the dashboard server until Ctrl-C.
async fn serve(service: Arc<RewardsService>) -> anyhow::Result<()> {
    let config = service.config();
    let listen_addr = config.listen_addr;

    let scheduler = Scheduler::new(Arc::clone(&service), config.poll_interval);
    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    let scheduler_task = tokio::spawn(async move {
        let mut stop_rx = stop_rx;
        scheduler
            .run(async move {
                let _ = stop_rx.wait_for(|stopped| *stopped).await;
            })
            .await
    });

    let app = api::build_app(AppState::new(Arc::clone(&service)));
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = stop_tx.send(true);
    let runs = scheduler_task.await.unwrap_or_default();
    tracing::info!(runs, "shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
