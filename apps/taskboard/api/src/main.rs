use axum_helpers::create_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::sql::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible so startup errors get the colored report
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState::new(config, db.clone());
    let app = api::app(&state)?;

    info!(
        prefix = %state.config.server.api_prefix,
        "Starting {} v{}",
        state.config.app.name,
        state.config.app.version
    );

    create_app(app, &state.config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutting down: closing database connections");
    drop(state);
    match db.close().await {
        Ok(_) => info!("Database connection closed successfully"),
        Err(e) => tracing::error!("Error closing database: {}", e),
    }

    Ok(())
}
