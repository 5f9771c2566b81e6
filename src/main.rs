//! SWC API server: reads settings from the environment, prepares the database, serves HTTP.

use axum::{extract::Request, ServiceExt};
use swc_api::{app, ensure_tables, open_pool, read_seed_script, seed_if_empty, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("swc_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = open_pool(&settings.database_url, settings.max_connections).await?;
    ensure_tables(&pool).await?;
    if let Some(path) = &settings.seed_script {
        let script = read_seed_script(path).await?;
        seed_if_empty(&pool, &script).await?;
    }

    let bind_addr = settings.bind_addr;
    let state = AppState::new(pool, settings);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state))).await?;
    Ok(())
}
