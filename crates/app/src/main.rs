//! relaunch - run and debug launch history
//!
//! Keeps the most recently launched configurations per mode and restores
//! them across runs.

use relaunch_core::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod state;

/// Filter used when neither `RUST_LOG` nor the settings file give one
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            settings
                .log_filter
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILTER),
        )
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    let args: cli::Args = argh::from_env();

    let loaded = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match &loaded {
        Ok(settings) => settings.clone(),
        Err(_) => Settings::default(),
    };

    // Initialize logging
    init_logging(&settings);
    if let Err(e) = loaded {
        tracing::warn!("Ignoring unreadable settings: {}", e);
    }

    let app_state = match state::AppState::new(&settings) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize relaunch: {}", e);
            eprintln!("relaunch: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = commands::execute(app_state, args.command).await {
        tracing::error!("Command failed: {}", e);
        eprintln!("relaunch: {e}");
        std::process::exit(1);
    }
}
