use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use domain::services::PaymentsProvider;
use shared::jwt::{JwtConfig, JwtError};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, optional_user_auth, rate_limit_middleware,
    require_user_auth, security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{health, mentors, reviews, services, stripe_connect, stripe_webhook, testimonials};
use crate::services::StripeClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    /// `None` when no payments secret key is configured.
    pub payments: Option<Arc<dyn PaymentsProvider>>,
    pub jwt: Arc<JwtConfig>,
}

/// Builds the router with the Stripe client described by `config`.
pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    let payments = match StripeClient::from_config(&config.stripe) {
        Ok(Some(client)) => Some(Arc::new(client) as Arc<dyn PaymentsProvider>),
        Ok(None) => {
            tracing::warn!("Stripe secret key not configured, payment routes will return 503");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize Stripe client");
            None
        }
    };
    create_app_with_payments(config, pool, payments)
}

/// Builds the router with an explicit payments provider.
pub fn create_app_with_payments(
    config: Config,
    pool: PgPool,
    payments: Option<Arc<dyn PaymentsProvider>>,
) -> Result<Router, JwtError> {
    let rate_limiter = (config.security.rate_limit_per_minute > 0)
        .then(|| Arc::new(RateLimiterState::new(config.security.rate_limit_per_minute)));
    build_router(config, pool, payments, rate_limiter)
}

/// Builds the router around an existing rate limiter, so the caller can
/// share it with background jobs.
pub fn build_router(
    config: Config,
    pool: PgPool,
    payments: Option<Arc<dyn PaymentsProvider>>,
    rate_limiter: Option<Arc<RateLimiterState>>,
) -> Result<Router, JwtError> {
    let jwt: Arc<JwtConfig> = Arc::new(config.auth.jwt_config()?);
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        rate_limiter,
        payments,
        jwt,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Mentor-only routes: auth runs first, then rate limiting keyed by user
    let protected_routes = Router::new()
        .route(
            "/api/v1/stripe/connect/account",
            post(stripe_connect::create_account).get(stripe_connect::get_account),
        )
        .route(
            "/api/v1/stripe/connect/account-link",
            post(stripe_connect::create_account_link),
        )
        .route("/api/v1/services", post(services::create_service))
        .route("/api/v1/services/:service_id", delete(services::delete_service))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user_auth));

    // Anonymous writes: a token is used when present but never required
    let open_write_routes = Router::new()
        .route(
            "/api/v1/mentors/:mentor_id/reviews",
            post(reviews::create_review),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), optional_user_auth));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/mentors", get(mentors::list_mentors))
        .route("/api/v1/mentors/:mentor_id", get(mentors::get_mentor))
        .route(
            "/api/v1/mentors/:mentor_id/services",
            get(mentors::list_mentor_services),
        )
        .route(
            "/api/v1/mentors/:mentor_id/reviews",
            get(reviews::list_reviews),
        )
        .route("/api/v1/testimonials", get(testimonials::list_testimonials))
        // Signed by Stripe instead of a bearer token
        .route("/api/v1/stripe/webhook", post(stripe_webhook::receive_event));

    let router = Router::new()
        .merge(public_routes)
        .merge(open_write_routes)
        .merge(protected_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state);

    Ok(router)
}
