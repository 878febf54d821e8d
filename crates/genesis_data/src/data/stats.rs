use serde::{Deserialize, Serialize};

/// Cumulative counters maintained by the universe across ticks.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UniverseStats {
    /// Offspring produced by reproduction.
    pub total_births: u64,
    pub total_deaths: u64,
    /// Agents inserted without a parent (initial population, predator spawns).
    pub total_spawns: u64,
    pub total_kills: u64,
    pub total_energy_consumed: f64,
    pub peak_population: usize,
    pub predator_count: usize,
    pub prey_count: usize,
    pub signals_emitted: u64,
    pub signals_dropped: u64,
}
