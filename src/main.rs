//! OpenAir Photobooths web server.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openair_booth_web::cache::start_cache_warmer;
use openair_booth_web::config::Config;
use openair_booth_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "openair_booth_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        bind_addr = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        service_region = %config.service_region,
        "Configuration loaded"
    );

    let bind_addr = config.bind_addr;
    let state = AppState::from_config(config);

    tokio::spawn(start_cache_warmer(
        state.cache.clone(),
        state.availability.clone(),
    ));

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
