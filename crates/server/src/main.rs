//! vidshare schema bootstrap.
//!
//! Loads configuration, connects to the database, applies pending
//! migrations and exits.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use vidshare_common::{Config, LoggingConfig};
use vidshare_core::DataAccess;

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    init_tracing(&config.logging);

    info!("Starting vidshare...");

    let access = DataAccess::connect(&config).await?;

    info!("Running database migrations...");
    access.migrate().await?;
    info!("Migrations completed");

    access.close().await?;
    info!("Shutdown complete");

    Ok(())
}
