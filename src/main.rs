//! GeoLog - Location Capture Log
//!
//! Headless entry point: loads the saved theme and location history, and
//! captures one location when run with `--capture`.

use anyhow::Context;
use geolog::storage::config::{default_data_dir, AppConfig};
use geolog::LocationApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GeoLog v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_default().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig {
            data_dir: default_data_dir(),
            ..Default::default()
        }
    });

    let mut app = LocationApp::open(&config).with_context(|| {
        format!(
            "opening location store at {}",
            config.database_path().display()
        )
    })?;

    app.start();

    if std::env::args().any(|arg| arg == "--capture") {
        app.capture().await;
    }

    let state = app.state();
    tracing::info!("Theme: {}", state.theme);
    for record in &state.locations {
        tracing::info!("{}: {}", record.title(), record.description());
    }

    Ok(())
}
