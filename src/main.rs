// src/main.rs

use poppins::{AppState, config::Config, telemetry};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let _guard = telemetry::init(&config);

    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to set up content service client: {}", e);
            std::process::exit(1);
        }
    };

    if !state.service.check_health().await {
        tracing::error!(
            "Content service at {} is not reachable",
            state.config.api_base_url
        );
        std::process::exit(1);
    }

    match state.service.config_status().await {
        Ok(status) => {
            for (key, value) in status {
                tracing::info!("service config {} = {}", key, value);
            }
        }
        Err(e) => tracing::warn!("Could not read service configuration: {}", e),
    }

    let mut dashboard = state.dashboard();
    match dashboard.load().await {
        Ok(()) => {
            let stats = dashboard.stats();
            tracing::info!(
                "{} saved courses ({} in progress, {} completed)",
                stats.total,
                stats.in_progress,
                stats.completed
            );
        }
        Err(e) => tracing::error!("Failed to load saved courses: {}", e.user_message()),
    }
}
