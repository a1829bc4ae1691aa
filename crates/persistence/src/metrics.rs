//! Query timing and connection pool gauges for the artist schema store.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Histogram of repository query latency, labelled by `query`.
pub const QUERY_SECONDS: &str = "artist_schema_query_seconds";

/// Gauge of pool connections, labelled by `state` (`in_use`, `idle`, `open`).
pub const POOL_CONNECTIONS: &str = "artist_schema_pool_connections";

/// Connection counts of the pool at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolUsage {
    pub open: usize,
    pub idle: usize,
}

impl PoolUsage {
    pub fn of(pool: &PgPool) -> Self {
        Self {
            open: pool.size() as usize,
            idle: pool.num_idle(),
        }
    }

    /// Connections held by a request or an open transaction.
    pub fn in_use(&self) -> usize {
        self.open.saturating_sub(self.idle)
    }

    fn by_state(&self) -> [(&'static str, usize); 3] {
        [
            ("in_use", self.in_use()),
            ("idle", self.idle),
            ("open", self.open),
        ]
    }

    /// Sets one [`POOL_CONNECTIONS`] gauge per state. Refreshed per scrape.
    pub fn publish(&self) {
        for (state, count) in self.by_state() {
            gauge!(POOL_CONNECTIONS, "state" => state).set(count as f64);
        }
    }
}

/// Times one repository query into [`QUERY_SECONDS`].
///
/// ```ignore
/// let timer = QueryTimer::new("list_active_field_definitions");
/// let result = sqlx::query_as::<_, FieldDefinitionEntity>(...).fetch_all(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    pub fn record(self) {
        histogram!(QUERY_SECONDS, "query" => self.query)
            .record(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_usage_counts_connections_by_state() {
        let usage = PoolUsage { open: 5, idle: 2 };
        assert_eq!(usage.in_use(), 3);
        assert_eq!(
            usage.by_state(),
            [("in_use", 3), ("idle", 2), ("open", 5)]
        );
    }

    #[test]
    fn test_pool_usage_never_underflows() {
        // size() and num_idle() are read separately and can race.
        let usage = PoolUsage { open: 1, idle: 2 };
        assert_eq!(usage.in_use(), 0);
    }

    #[test]
    fn test_metric_names_are_prometheus_safe() {
        for name in [QUERY_SECONDS, POOL_CONNECTIONS] {
            assert!(name.starts_with("artist_schema_"));
            assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }

    #[test]
    fn test_query_timer_records_without_recorder() {
        // No global recorder is installed in unit tests; recording is a no-op.
        let timer = QueryTimer::new("lock_artist_profile");
        assert_eq!(timer.query, "lock_artist_profile");
        timer.record();
    }
}
