use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use mentor_marketplace_api::app;
use mentor_marketplace_api::config::Config;
use mentor_marketplace_api::jobs::{JobScheduler, PoolMetricsJob, RateLimitCleanupJob};
use mentor_marketplace_api::middleware::{self, RateLimiterState};
use mentor_marketplace_api::services::StripeClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    middleware::logging::init_logging(&config.logging);

    info!("Starting Mentor Marketplace API v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = middleware::init_metrics() {
        tracing::warn!(error = %e, "Prometheus recorder not installed");
    }

    let pool = persistence::db::create_pool(&(&config.database).into()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let payments = StripeClient::from_config(&config.stripe)?
        .map(|client| Arc::new(client) as Arc<dyn domain::services::PaymentsProvider>);
    if payments.is_none() {
        tracing::warn!("Stripe secret key not configured, payment routes will return 503");
    }

    let rate_limiter = (config.security.rate_limit_per_minute > 0)
        .then(|| Arc::new(RateLimiterState::new(config.security.rate_limit_per_minute)));

    let mut scheduler = JobScheduler::new();
    scheduler.register(PoolMetricsJob::new(pool.clone()));
    if let Some(limiter) = &rate_limiter {
        scheduler.register(RateLimitCleanupJob::new(Arc::clone(limiter)));
    }
    scheduler.start();

    let addr = config.socket_addr()?;
    let app = app::build_router(config, pool, payments, rate_limiter)?;

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown(Duration::from_secs(5)).await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
