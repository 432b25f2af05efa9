//! Tick metrics and logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters sampled once per tick.
pub struct Metrics {
    tick_count: AtomicU64,
    entity_count: AtomicU64,
    last_tick_micros: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs a summary every `log_interval` ticks.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            entity_count: AtomicU64::new(0),
            last_tick_micros: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, entities: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.entity_count.store(entities as u64, Ordering::Relaxed);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.last_tick_micros.store(micros, Ordering::Relaxed);

        if tick % self.log_interval == 0 {
            tracing::info!(
                tick = tick,
                entities = entities,
                duration_us = micros,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn entity_count(&self) -> u64 {
        self.entity_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn last_tick(&self) -> Duration {
        Duration::from_micros(self.last_tick_micros.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Zeroes the counters, e.g. when a new simulation is loaded.
    pub fn reset(&self) {
        self.tick_count.store(0, Ordering::Relaxed);
        self.entity_count.store(0, Ordering::Relaxed);
        self.last_tick_micros.store(0, Ordering::Relaxed);
    }
}

/// Installs a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (e.g. `"info"`) is
/// used. Calling this twice is harmless.
pub fn init_logging(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new(10);
        assert_eq!(metrics.tick_count(), 0);
    }

    #[test]
    fn test_record_tick() {
        let metrics = Metrics::new(10);
        metrics.record_tick(Duration::from_millis(16), 100);
        assert_eq!(metrics.tick_count(), 1);
        assert_eq!(metrics.entity_count(), 100);
        assert_eq!(metrics.last_tick(), Duration::from_millis(16));
    }

    #[test]
    fn test_reset() {
        let metrics = Metrics::new(0);
        metrics.record_tick(Duration::from_millis(1), 3);
        metrics.reset();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.entity_count(), 0);
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("warn");
        init_logging("debug");
    }
}
