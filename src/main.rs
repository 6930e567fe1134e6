// Main entry point - Wiring of the live dashboard engine and terminal front end
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::engine::DashboardEngine;
use crate::application::live_service::LiveDashboard;
use crate::application::scheduler::RefreshScheduler;
use crate::domain::filters::Filters;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::random::build_rng;
use crate::infrastructure::system_clock::SystemWallClock;
use crate::presentation::app_state::AppState;
use crate::presentation::console::{ConsoleRenderer, run_render_loop};
use crate::presentation::handlers::run_command_loop;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_dashboard_config()?;

    // Initialize tracing on stderr so stdout stays free for the dashboard
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Build the engine (application layer) with production adapters
    let engine = DashboardEngine::new(
        config.engine.settings(),
        Arc::new(SystemWallClock),
        build_rng(config.engine.seed),
    );
    let scheduler = RefreshScheduler::new(config.engine.countdown_seconds, config.engine.auto_refresh);
    let (dashboard, driver) = LiveDashboard::spawn(
        engine,
        scheduler,
        Filters::default(),
        config.engine.tick_interval(),
    );

    let state = Arc::new(AppState {
        dashboard,
        renderer: Arc::new(ConsoleRenderer),
    });

    // Render every published snapshot
    let renderer = tokio::spawn(run_render_loop(
        state.clone(),
        config.presentation.render_on_tick,
    ));

    // Read operator commands until quit, end of input or Ctrl-C
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = tokio::select! {
        result = run_command_loop(state.clone(), stdin) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            Ok(())
        }
    };

    // Stop the engine task; a closed channel means it is already gone
    let _ = state.dashboard.shutdown().await;
    driver.await?;
    renderer.abort();

    result
}
