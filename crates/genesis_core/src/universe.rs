//! The universe: owner of all simulation state and the tick pipeline.

use crate::brain::BrainLogic;
use crate::config::AppConfig;
use crate::energy_field::EnergyField;
use crate::lifecycle::{self, Neighbors, TickContext};
use crate::metrics::Metrics;
use crate::signal::SignalField;
use crate::snapshot::{AgentView, UniverseSnapshot, SNAPSHOT_VERSION};
use crate::systems::stats::{self, StatsReport};
use crate::systems::reproduction;
use genesis_data::{Agent, Species, UniverseStats};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::time::Instant;
use uuid::Uuid;

/// Result of one [`Universe::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Population exceeded the emergency ceiling; the caller should stop.
    Halt,
}

/// Offspring produced during the agent pass, tagged with the parent's index
/// in the pre-sweep agent list.
type Offspring = Vec<(usize, Agent)>;

#[derive(Debug)]
pub struct Universe {
    config: AppConfig,
    tick: u64,
    seed: u64,
    field: EnergyField,
    signals: SignalField,
    agents: Vec<Agent>,
    stats: UniverseStats,
    rng: ChaCha8Rng,
    metrics: Metrics,
}

impl Universe {
    /// Validates `config`, seeds the energy field and places the initial
    /// population.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut universe = Self::empty(config, seed);

        universe.field.seed_initial(
            &mut universe.rng,
            universe.config.energy.initial_distribution,
            universe.config.energy.amount,
        );
        for _ in 0..universe.config.world.initial_organisms {
            universe.spawn(Species::Prey);
        }
        if universe.config.features.predators {
            for _ in 0..universe.config.world.initial_predators {
                universe.spawn(Species::Predator);
            }
        }

        tracing::info!(
            seed,
            width = universe.config.world.width,
            height = universe.config.world.height,
            population = universe.agents.len(),
            field_energy = universe.field.total_energy(),
            "Universe created"
        );
        Ok(universe)
    }

    fn empty(config: AppConfig, seed: u64) -> Self {
        let (w, h) = (config.world.width, config.world.height);
        Self {
            field: EnergyField::new(w, h, config.energy.max_per_cell),
            signals: SignalField::new(w, h, config.communication.max_signals),
            agents: Vec::new(),
            stats: UniverseStats::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            metrics: Metrics::new(config.world.log_interval),
            tick: 0,
            seed,
            config,
        }
    }

    fn spawn(&mut self, species: Species) {
        let agent = lifecycle::spawn_random_agent(species, &self.config, &mut self.rng, self.tick);
        self.insert_agent(agent);
    }

    /// Adds an externally built agent to the live list. Counted as a spawn.
    pub fn insert_agent(&mut self, agent: Agent) {
        match agent.species {
            Species::Prey => self.stats.prey_count += 1,
            Species::Predator => self.stats.predator_count += 1,
        }
        self.agents.push(agent);
        self.stats.total_spawns += 1;
        self.stats.peak_population = self.stats.peak_population.max(self.agents.len());
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) -> TickOutcome {
        let started = Instant::now();
        self.tick += 1;

        self.field.replenish(
            &mut self.rng,
            self.config.energy.spawn_rate,
            self.config.energy.amount,
        );
        self.signals.update(&self.config.communication);

        if self.config.features.predators {
            self.maybe_spawn_predator();
        }

        let mut offspring = self.run_agent_pass();
        if self.config.features.multicellular {
            self.apply_adhesion(&mut offspring);
        }
        self.sweep_dead();
        self.add_offspring(offspring);

        let population = self.agents.len();
        if self
            .metrics
            .record_tick(started.elapsed(), population, self.signals.len())
        {
            self.metrics.log_report(&self.get_stats());
        }

        if population > self.config.population.emergency_stop_population {
            tracing::warn!(
                tick = self.tick,
                population,
                limit = self.config.population.emergency_stop_population,
                "Emergency stop: population ceiling exceeded"
            );
            return TickOutcome::Halt;
        }
        if population == 0 && self.stats.total_deaths > 0 {
            tracing::debug!(tick = self.tick, "Population extinct");
        }
        TickOutcome::Continue
    }

    fn maybe_spawn_predator(&mut self) {
        if self.rng.gen::<f64>() >= self.config.predation.spawn_chance {
            return;
        }
        let population = self.agents.len() as f64;
        let predators = self.stats.predator_count as f64;
        if predators < population * self.config.predation.max_predator_fraction {
            self.spawn(Species::Predator);
            tracing::debug!(tick = self.tick, predators = self.stats.predator_count, "Predator spawned");
        }
    }

    /// Drives every agent present at the start of the pass through its
    /// lifecycle, in insertion order.
    fn run_agent_pass(&mut self) -> Offspring {
        let snapshot_len = self.agents.len();
        let mut offspring: Offspring = Vec::new();

        for i in 0..snapshot_len {
            let (before, rest) = self.agents.split_at_mut(i);
            let Some((agent, after)) = rest.split_first_mut() else {
                break;
            };
            // Killed earlier in this pass.
            if agent.is_dead() {
                continue;
            }

            let mut ctx = TickContext {
                config: &self.config,
                field: &mut self.field,
                signals: &mut self.signals,
                neighbors: Neighbors::new(before, after),
                rng: &mut self.rng,
            };
            let events = lifecycle::update_agent(agent, &mut ctx);
            if events.kill.is_some() {
                self.stats.total_kills += 1;
            }
            if events.died_of_age {
                self.metrics.increment_counter("old_age_deaths");
                tracing::trace!(agent = %agent.id(), age = agent.age, "Died of old age");
            }
            if events.signal.is_some() {
                self.metrics.increment_counter("signals_sent");
            }
            if events.kin_found > 0 {
                self.metrics.increment_counter("kin_recognitions");
            }
            if agent.is_dead() {
                continue;
            }

            let population = snapshot_len + offspring.len();
            if let Some(child) =
                reproduction::try_reproduce(agent, population, &self.config, &mut self.rng, self.tick)
            {
                tracing::trace!(parent = %agent.id(), child = %child.id(), "Birth");
                offspring.push((i, child));
            }
        }
        offspring
    }

    /// Lets some offspring stay attached to their parent's colony.
    fn apply_adhesion(&mut self, offspring: &mut Offspring) {
        let max_size = self.config.adhesion.max_organism_size;
        let mut sizes: HashMap<Uuid, usize> = HashMap::new();
        for colony in self
            .agents
            .iter()
            .filter(|a| !a.is_dead())
            .filter_map(|a| a.colony_id)
        {
            *sizes.entry(colony).or_default() += 1;
        }

        for (parent_idx, child) in offspring.iter_mut() {
            if self.rng.gen::<f64>() >= self.config.adhesion.chance {
                continue;
            }
            let Some(parent) = self.agents.get_mut(*parent_idx) else {
                continue;
            };
            if parent.is_dead() {
                continue;
            }
            let (colony, size) = match parent.colony_id {
                Some(id) => (id, sizes.get(&id).copied().unwrap_or(1)),
                None => (Uuid::from_u128(self.rng.gen()), 1),
            };
            if size >= max_size {
                continue;
            }
            parent.colony_id = Some(colony);
            child.colony_id = Some(colony);
            sizes.insert(colony, size + 1);
        }
    }

    fn sweep_dead(&mut self) {
        let before = self.agents.len();
        self.agents.retain(|a| !a.is_dead());
        let deaths = before - self.agents.len();
        self.stats.total_deaths += deaths as u64;
    }

    fn add_offspring(&mut self, offspring: Offspring) {
        self.stats.total_births += offspring.len() as u64;
        self.agents.extend(offspring.into_iter().map(|(_, child)| child));

        let (prey, predators) = stats::species_counts(&self.agents);
        self.stats.prey_count = prey;
        self.stats.predator_count = predators;
        self.stats.peak_population = self.stats.peak_population.max(self.agents.len());
        self.stats.total_energy_consumed = self.field.total_consumed();
        self.stats.signals_emitted = self.signals.emitted();
        self.stats.signals_dropped = self.signals.dropped();
    }

    #[must_use]
    pub fn get_stats(&self) -> StatsReport {
        stats::compute_report(self.tick, &self.agents, &self.field, &self.signals, &self.stats)
    }

    #[must_use]
    pub fn snapshot(&self) -> UniverseSnapshot {
        UniverseSnapshot {
            version: SNAPSHOT_VERSION,
            tick: self.tick,
            seed: self.seed,
            config: self.config.clone(),
            config_fingerprint: self.config.fingerprint(),
            field: self.field.clone(),
            signals: self.signals.clone(),
            agents: self.agents.clone(),
            stats: self.stats.clone(),
            rng: self.rng.clone(),
        }
    }

    /// Rebuilds a universe from a snapshot, checking it for consistency.
    pub fn from_snapshot(snapshot: UniverseSnapshot) -> anyhow::Result<Self> {
        anyhow::ensure!(
            snapshot.version == SNAPSHOT_VERSION,
            "Unsupported snapshot version {} (expected {})",
            snapshot.version,
            SNAPSHOT_VERSION
        );
        let config = snapshot.config;
        config.validate()?;
        if config.fingerprint() != snapshot.config_fingerprint {
            tracing::warn!("Snapshot config fingerprint mismatch; using embedded config");
        }

        let (w, h) = (config.world.width, config.world.height);
        let field = EnergyField::from_cells(
            w,
            h,
            config.energy.max_per_cell,
            snapshot.field.cells().to_vec(),
            snapshot.field.total_consumed(),
        )?;
        anyhow::ensure!(
            snapshot.signals.width == w && snapshot.signals.height == h,
            "Signal field is {}x{}, world is {}x{}",
            snapshot.signals.width,
            snapshot.signals.height,
            w,
            h
        );
        for agent in &snapshot.agents {
            anyhow::ensure!(
                agent.position.x < w && agent.position.y < h,
                "Agent {} lies outside the {}x{} grid",
                agent.id(),
                w,
                h
            );
            if let Some(brain) = &agent.genome.brain {
                brain.validate()?;
            }
        }

        tracing::info!(
            tick = snapshot.tick,
            population = snapshot.agents.len(),
            "Universe restored"
        );
        Ok(Self {
            metrics: Metrics::new(config.world.log_interval),
            tick: snapshot.tick,
            seed: snapshot.seed,
            field,
            signals: snapshot.signals,
            agents: snapshot.agents,
            stats: snapshot.stats,
            rng: snapshot.rng,
            config,
        })
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    #[must_use]
    pub fn agent_views(&self) -> Vec<AgentView> {
        self.agents.iter().map(AgentView::from).collect()
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn field(&self) -> &EnergyField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut EnergyField {
        &mut self.field
    }

    #[must_use]
    pub fn signals(&self) -> &SignalField {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut SignalField {
        &mut self.signals
    }

    #[must_use]
    pub fn stats(&self) -> &UniverseStats {
        &self.stats
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The universe's RNG, for building agents that stay reproducible.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.width = 30;
        config.world.height = 30;
        config.world.seed = Some(seed);
        config
    }

    #[test]
    fn test_new_places_initial_population() {
        let universe = Universe::new(small_config(1)).unwrap();
        assert_eq!(universe.population(), 12);
        assert_eq!(universe.stats().predator_count, 2);
        assert_eq!(universe.stats().total_spawns, 12);
        assert_eq!(universe.stats().total_births, 0);
        assert_eq!(universe.tick(), 0);
    }

    #[test]
    fn test_predators_disabled_at_start() {
        let mut config = small_config(2);
        config.features.predators = false;
        let universe = Universe::new(config).unwrap();
        assert!(universe.agents().iter().all(|a| a.species == Species::Prey));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config(3);
        config.world.height = 0;
        assert!(Universe::new(config).is_err());
    }

    #[test]
    fn test_update_advances_tick_and_bounds_field() {
        let mut universe = Universe::new(small_config(4)).unwrap();
        for _ in 0..50 {
            assert_eq!(universe.update(), TickOutcome::Continue);
        }
        assert_eq!(universe.tick(), 50);
        let max = universe.config().energy.max_per_cell;
        assert!(universe.field().cells().iter().all(|&e| (0.0..=max).contains(&e)));
        assert!(universe.agents().iter().all(|a| !a.is_dead()));
    }

    #[test]
    fn test_stats_track_population() {
        let mut universe = Universe::new(small_config(5)).unwrap();
        for _ in 0..40 {
            universe.update();
        }
        let report = universe.get_stats();
        assert_eq!(report.population, universe.population());
        assert_eq!(report.prey_count + report.predator_count, report.population);
        assert_eq!(
            report.spawns + report.births - report.deaths,
            report.population as u64
        );
        assert!(report.peak_population >= report.population);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut universe = Universe::new(small_config(6)).unwrap();
        for _ in 0..10 {
            universe.update();
        }
        let snapshot = universe.snapshot();
        let restored = Universe::from_snapshot(snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn test_agent_views_mirror_agents() {
        let universe = Universe::new(small_config(9)).unwrap();
        let views = universe.agent_views();
        assert_eq!(views.len(), universe.population());
        for (view, agent) in views.iter().zip(universe.agents()) {
            assert_eq!(view.id, agent.id());
            assert_eq!((view.x, view.y), agent.position());
            assert_eq!(view.species, agent.species);
        }
    }

    #[test]
    fn test_restore_rejects_out_of_grid_agent() {
        let universe = Universe::new(small_config(7)).unwrap();
        let mut snapshot = universe.snapshot();
        snapshot.agents[0].position.x = 500;
        assert!(Universe::from_snapshot(snapshot).is_err());
    }

    #[test]
    fn test_adhesion_caps_colony_size() {
        let mut config = small_config(8);
        config.features.predators = false;
        config.adhesion.chance = 1.0;
        config.adhesion.max_organism_size = 3;
        config.energy.spawn_rate = 0.0;
        let mut universe = Universe::new(config).unwrap();
        universe.agents.truncate(1);
        universe.agents[0].energy = 10_000.0;
        universe.agents[0].genome.reproduce_threshold = 200.0;
        universe.agents[0].genome.move_probability = 0.0;

        let mut offspring: Offspring = (0..5)
            .map(|_| {
                let child = lifecycle::spawn_random_agent(
                    Species::Prey,
                    &universe.config,
                    &mut universe.rng,
                    0,
                );
                (0, child)
            })
            .collect();
        universe.apply_adhesion(&mut offspring);
        let attached = offspring.iter().filter(|(_, c)| c.colony_id.is_some()).count();
        assert_eq!(attached, 2);
        assert!(universe.agents[0].colony_id.is_some());
    }
}
