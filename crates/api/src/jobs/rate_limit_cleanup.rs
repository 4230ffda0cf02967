//! Drops idle rate limiter buckets so the keyed store does not grow
//! with every caller ever seen.

use std::sync::Arc;
use std::time::Duration;

use super::scheduler::Job;
use crate::middleware::RateLimiterState;

pub struct RateLimitCleanupJob {
    limiter: Arc<RateLimiterState>,
}

impl RateLimitCleanupJob {
    pub fn new(limiter: Arc<RateLimiterState>) -> Self {
        Self { limiter }
    }
}

#[async_trait::async_trait]
impl Job for RateLimitCleanupJob {
    fn name(&self) -> &'static str {
        "rate_limit_cleanup"
    }

    fn period(&self) -> Duration {
        Duration::from_secs(300)
    }

    async fn run(&self) -> Result<(), String> {
        self.limiter.retain_recent();
        Ok(())
    }
}
