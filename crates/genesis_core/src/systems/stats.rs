use crate::energy_field::EnergyField;
use crate::signal::SignalField;
use genesis_data::{Agent, Species, UniverseStats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Point-in-time summary returned by `Universe::get_stats`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StatsReport {
    pub tick: u64,
    pub population: usize,
    pub births: u64,
    pub deaths: u64,
    pub spawns: u64,
    pub kills: u64,
    pub peak_population: usize,
    /// Energy still lying in the field.
    pub total_energy: f64,
    pub avg_agent_energy: f64,
    pub predator_count: usize,
    pub prey_count: usize,
    pub active_signals: usize,
    pub signals_emitted: u64,
    pub energy_consumed: f64,
    pub max_generation: u32,
    /// Colonies with at least two members.
    pub colonies: usize,
}

/// Number of colonies that currently hold at least two agents.
#[must_use]
pub fn count_colonies(agents: &[Agent]) -> usize {
    let mut sizes: HashMap<Uuid, usize> = HashMap::new();
    for colony in agents.iter().filter_map(|a| a.colony_id) {
        *sizes.entry(colony).or_default() += 1;
    }
    sizes.values().filter(|&&n| n >= 2).count()
}

/// Recounts species from scratch.
#[must_use]
pub fn species_counts(agents: &[Agent]) -> (usize, usize) {
    agents.iter().fold((0, 0), |(prey, pred), a| match a.species {
        Species::Prey => (prey + 1, pred),
        Species::Predator => (prey, pred + 1),
    })
}

#[must_use]
pub fn compute_report(
    tick: u64,
    agents: &[Agent],
    field: &EnergyField,
    signals: &SignalField,
    stats: &UniverseStats,
) -> StatsReport {
    let population = agents.len();
    let total_agent_energy: f64 = agents.iter().map(|a| a.energy).sum();
    StatsReport {
        tick,
        population,
        births: stats.total_births,
        deaths: stats.total_deaths,
        spawns: stats.total_spawns,
        kills: stats.total_kills,
        peak_population: stats.peak_population,
        total_energy: field.total_energy(),
        avg_agent_energy: if population > 0 {
            total_agent_energy / population as f64
        } else {
            0.0
        },
        predator_count: stats.predator_count,
        prey_count: stats.prey_count,
        active_signals: signals.len(),
        signals_emitted: signals.emitted(),
        energy_consumed: field.total_consumed(),
        max_generation: agents
            .iter()
            .map(|a| a.genome.generation)
            .max()
            .unwrap_or(0),
        colonies: count_colonies(agents),
    }
}
