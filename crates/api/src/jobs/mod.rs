//! Periodic housekeeping tasks run alongside the HTTP server.

mod pool_metrics;
mod rate_limit_cleanup;
mod scheduler;

pub use pool_metrics::PoolMetricsJob;
pub use rate_limit_cleanup::RateLimitCleanupJob;
pub use scheduler::{Job, JobScheduler};
