use std::sync::Arc;

use oa_api_rust::app::app;
use oa_api_rust::config::config;
use oa_api_rust::database::{DatabaseManager, MySqlIntrospector};
use oa_api_rust::is_development;
use oa_api_rust::services::ScaffoldService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SCAFFOLD_*, etc.
    let _ = dotenvy::dotenv();

    let default_filter = if is_development!() { "oa_api_rust=debug,tower_http=debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config();
    tracing::info!("Starting OA API in {:?} mode", config.environment);
    tracing::info!(
        "Generated modules go to {}, registry {}",
        config.scaffold.output_root.display(),
        config.scaffold.registry_file.display()
    );

    let service = Arc::new(ScaffoldService::from_config(Arc::new(MySqlIntrospector::new())));
    let app = app(service);

    // Allow tests or deployments to override port via env
    let port = std::env::var("OA_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("OA API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    DatabaseManager::close().await;
    Ok(())
}
