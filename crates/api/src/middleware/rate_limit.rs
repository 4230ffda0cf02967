//! Rate limiting middleware.
//!
//! Write routes are limited per caller: the authenticated user when a
//! token was accepted, else the first `X-Forwarded-For` hop, else one
//! shared anonymous bucket.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter as GovRateLimiter,
};
use serde_json::json;
use std::num::NonZeroU32;

use crate::app::AppState;
use crate::middleware::user_auth::UserAuth;
use crate::middleware::trace_id::get_request_id;

type KeyedRateLimiter = GovRateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Bucket shared by callers with neither a token nor a forwarded address.
const ANONYMOUS_KEY: &str = "anonymous";

/// Rate limiter state shared across all requests.
pub struct RateLimiterState {
    limiter: KeyedRateLimiter,
    clock: DefaultClock,
    rate_limit_per_minute: u32,
}

impl RateLimiterState {
    /// Create a limiter allowing `rate_limit_per_minute` requests per caller.
    /// Zero is treated as one.
    pub fn new(rate_limit_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: GovRateLimiter::keyed(Quota::per_minute(per_minute)),
            clock: DefaultClock::default(),
            rate_limit_per_minute,
        }
    }

    /// Returns `Err(retry_after_secs)` when the caller is over the limit.
    pub fn check(&self, key: &str) -> Result<(), u64> {
        self.limiter.check_key(&key.to_string()).map_err(|not_until| {
            not_until.wait_time_from(self.clock.now()).as_secs().max(1)
        })
    }

    /// Drops buckets that have fully refilled.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
    }
}

impl std::fmt::Debug for RateLimiterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiterState")
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("active_keys", &self.limiter.len())
            .finish()
    }
}

/// Picks the rate limit key for a request.
pub fn caller_key(auth: Option<&UserAuth>, headers: &HeaderMap) -> String {
    if let Some(auth) = auth {
        return format!("user:{}", auth.user_id);
    }
    headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(|ip| format!("ip:{}", ip))
        .unwrap_or_else(|| ANONYMOUS_KEY.to_string())
}

/// Middleware that applies per-caller rate limiting.
///
/// Must run after authentication so the user id is in request extensions.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(ref rate_limiter) = state.rate_limiter {
        let key = caller_key(req.extensions().get::<UserAuth>(), req.headers());
        if let Err(retry_after) = rate_limiter.check(&key) {
            tracing::debug!(
                key = %key,
                retry_after,
                request_id = %get_request_id(req.extensions()),
                "Rate limit exceeded"
            );
            return rate_limited_response(state.config.security.rate_limit_per_minute, retry_after);
        }
    }

    next.run(req).await
}

/// Create a rate limited response with proper headers and body.
fn rate_limited_response(limit: u32, retry_after: u64) -> Response {
    let body = json!({
        "error": "rate_limited",
        "message": format!("Rate limit of {} requests/minute exceeded", limit),
        "retry_after": retry_after
    });

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}
