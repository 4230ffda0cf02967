//! Database metrics: query latency histograms and pool gauges.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Histogram of query latency, labelled by query name.
pub const QUERY_DURATION_METRIC: &str = "database_query_duration_seconds";

/// Record the duration of a named query.
pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!(QUERY_DURATION_METRIC, "query" => query_name).record(duration_secs);
}

/// Record connection pool gauges. Called from the readiness probe.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one repository call.
///
/// ```ignore
/// let timer = QueryTimer::new("find_service_by_id");
/// let result = sqlx::query_as::<_, ServiceEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
///
/// A timer dropped without `record` (the query returned early through `?`)
/// records nothing, so error latencies do not skew the histogram.
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.query_name
    }

    /// Record the elapsed duration.
    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }
}
