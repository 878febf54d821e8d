//! Performance metrics and logging setup for the simulation.

use crate::systems::stats::StatsReport;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Tick timing and named counters, logged every `log_interval` ticks.
#[derive(Debug, Clone)]
pub struct Metrics {
    tick_count: u64,
    log_interval: u64,
    last_tick: Duration,
    total_tick_time: Duration,
    population: usize,
    signals: usize,
    pub counters: HashMap<String, u64>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: 0,
            log_interval: log_interval.max(1),
            last_tick: Duration::ZERO,
            total_tick_time: Duration::ZERO,
            population: 0,
            signals: 0,
            counters: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick. Returns `true` on logging ticks.
    pub fn record_tick(&mut self, duration: Duration, population: usize, signals: usize) -> bool {
        self.tick_count += 1;
        self.last_tick = duration;
        self.total_tick_time += duration;
        self.population = population;
        self.signals = signals;
        self.tick_count % self.log_interval == 0
    }

    /// Logs a stats report together with timing data.
    pub fn log_report(&self, report: &StatsReport) {
        tracing::info!(
            tick = report.tick,
            population = report.population,
            prey = report.prey_count,
            predators = report.predator_count,
            births = report.births,
            deaths = report.deaths,
            kills = report.kills,
            signals = report.active_signals,
            field_energy = report.total_energy,
            max_generation = report.max_generation,
            colonies = report.colonies,
            tick_us = self.last_tick.as_micros() as u64,
            avg_tick_us = self.average_tick().as_micros() as u64,
            "Universe stats"
        );
    }

    pub fn increment_counter(&mut self, name: &str) {
        *self.counters.entry(name.to_string()).or_default() += 1;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.population
    }

    #[must_use]
    pub fn signals(&self) -> usize {
        self.signals
    }

    #[must_use]
    pub fn average_tick(&self) -> Duration {
        mean_duration(self.total_tick_time, self.tick_count)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// `total / count` without narrowing `count`; zero when nothing was counted.
#[must_use]
pub fn mean_duration(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    let nanos = total.as_nanos() / u128::from(count);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the `info`
/// default; repeated calls are ignored.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
