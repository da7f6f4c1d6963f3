//! # Crosspost Composer
//!
//! Runtime host for the post engine: wires the store, session services,
//! and the promotion scheduler, then runs until interrupted.

use crosspost_engine::{Scheduler, SchedulerConfig, SessionListener};

mod config;
mod state;

use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        sweep_interval_secs = config.sweep_interval.as_secs(),
        "Starting Crosspost composer"
    );

    // Build application state
    let state = AppState::new(&config).await;

    match state.accounts.current_user().await {
        Some(user) => tracing::info!(email = %user.email, "Resuming session"),
        None => tracing::info!("No active session"),
    }

    // Surface notification events in the log while no UI is attached
    let mut notifications = state.notifier.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = notifications.recv().await {
            tracing::info!(kind = ?event.kind, title = %event.title, "{}", event.message);
        }
    });

    // Clear session-scoped state when the active user logs out
    let session_listener = SessionListener::spawn(state.store.clone(), state.session.subscribe());

    // Promotion sweep on a fixed interval
    let mut scheduler = Scheduler::new(SchedulerConfig::from_env()).await?;
    let store = state.store.clone();
    scheduler
        .add_repeated(config.sweep_interval, move || {
            let store = store.clone();
            async move { store.promotion_sweep().await }
        })
        .await?;
    scheduler.start().await?;

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    scheduler.shutdown().await?;
    session_listener.shutdown();

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,composer=debug,crosspost_engine=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
