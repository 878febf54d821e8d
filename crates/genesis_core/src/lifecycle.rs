//! Agent creation and the fixed per-tick procedure every agent runs.

use crate::config::AppConfig;
use crate::energy_field::EnergyField;
use crate::genome::{predator_tint, GenomeLogic};
use crate::signal::SignalField;
use crate::systems::predation::{self, Kill};
use crate::systems::{action, communication, perception, social};
use genesis_data::{
    Agent, Direction, Genome, Identity, Memory, MemoryEntry, Position, SignalKind, SocialState,
    Species,
};
use rand::Rng;
use uuid::Uuid;

/// Every other agent in the live list, split around the one being updated.
pub struct Neighbors<'a> {
    before: &'a mut [Agent],
    after: &'a mut [Agent],
}

impl<'a> Neighbors<'a> {
    #[must_use]
    pub fn new(before: &'a mut [Agent], after: &'a mut [Agent]) -> Self {
        Self { before, after }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.before.iter().chain(self.after.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.before.iter_mut().chain(self.after.iter_mut())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mutable world state lent to one agent for the duration of its turn.
pub struct TickContext<'a, R: Rng> {
    pub config: &'a AppConfig,
    pub field: &'a mut EnergyField,
    pub signals: &'a mut SignalField,
    pub neighbors: Neighbors<'a>,
    pub rng: &'a mut R,
}

/// What happened to an agent during its turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentEvents {
    pub kill: Option<Kill>,
    pub signal: Option<SignalKind>,
    pub kin_found: usize,
    pub moved: bool,
    pub eaten: f64,
    pub died_of_age: bool,
}

/// Builds an agent around `genome`, attaching the optional components the
/// enabled features call for.
pub fn create_agent_with_genome<R: Rng>(
    species: Species,
    position: Position,
    genome: Genome,
    config: &AppConfig,
    rng: &mut R,
    tick: u64,
) -> Agent {
    let features = &config.features;
    let id = Uuid::from_u128(rng.gen());
    let facing = features
        .directional_sensing
        .then(|| Direction::from_index(rng.gen_range(0..Direction::ALL.len())));

    Agent {
        identity: Identity {
            id,
            parent_id: None,
        },
        position,
        energy: config.metabolism.start_energy,
        age: 0,
        species,
        genome,
        facing,
        memory: features.memory.then(|| Memory::new(config.memory.size)),
        social: features.social.then(SocialState::default),
        colony_id: None,
        birth_tick: tick,
        offspring_count: 0,
        last_outputs: None,
    }
}

/// Builds an agent with a fresh random genome. Predators get a red tint.
pub fn create_agent<R: Rng>(
    species: Species,
    position: Position,
    config: &AppConfig,
    rng: &mut R,
    tick: u64,
) -> Agent {
    let mut genome = Genome::new_random_with_rng(config, rng);
    if species == Species::Predator {
        genome.color = predator_tint(genome.color);
    }
    create_agent_with_genome(species, position, genome, config, rng, tick)
}

/// Builds a random agent at a uniformly random cell.
pub fn spawn_random_agent<R: Rng>(
    species: Species,
    config: &AppConfig,
    rng: &mut R,
    tick: u64,
) -> Agent {
    let position = Position {
        x: rng.gen_range(0..config.world.width),
        y: rng.gen_range(0..config.world.height),
    };
    create_agent(species, position, config, rng, tick)
}

fn remember_location(agent: &mut Agent, local_energy: f64, config: &AppConfig) {
    let Some(memory) = agent.memory.as_mut() else {
        return;
    };
    if local_energy > config.memory.energy_threshold {
        memory.remember(MemoryEntry {
            x: agent.position.x,
            y: agent.position.y,
            energy: local_energy,
        });
    }
}

fn local_energy(agent: &Agent, field: &EnergyField) -> f64 {
    field.get(i32::from(agent.position.x), i32::from(agent.position.y))
}

/// Runs one tick of the agent lifecycle in fixed order: metabolism, hunt,
/// memory, signalling, kin recognition, movement, eating, old age.
///
/// Death is not acted on here; the universe sweeps agents with
/// `energy <= 0` after the pass.
pub fn update_agent<R: Rng>(agent: &mut Agent, ctx: &mut TickContext<'_, R>) -> AgentEvents {
    let config = ctx.config;
    let mut events = AgentEvents::default();

    agent.age += 1;
    let mut upkeep = config.metabolism.cost_alive;
    if agent.is_predator() {
        upkeep *= config.metabolism.predator_cost_multiplier;
    }
    agent.energy -= upkeep;

    events.kill = predation::hunt(agent, &mut ctx.neighbors, ctx.signals, config);

    let here = local_energy(agent, ctx.field);
    remember_location(agent, here, config);

    events.signal = communication::maybe_emit(agent, here, ctx.signals, config, ctx.rng);

    if agent.social.is_some() && ctx.rng.gen::<f64>() < config.social.kin_check_probability {
        let sensed = perception::sense_agents(agent, ctx.neighbors.iter(), config);
        events.kin_found = social::recognise_kin(agent, &sensed, &config.social);
    }

    let (dx, dy) = action::decide_move(agent, ctx);
    events.moved = action::apply_move(agent, dx, dy, config);
    events.eaten = action::eat(agent, ctx.field);

    if agent.age > config.metabolism.max_age {
        agent.energy = 0.0;
        events.died_of_age = true;
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct World {
        config: AppConfig,
        field: EnergyField,
        signals: SignalField,
        rng: ChaCha8Rng,
    }

    impl World {
        fn new(config: AppConfig) -> Self {
            let (w, h) = (config.world.width, config.world.height);
            Self {
                field: EnergyField::new(w, h, config.energy.max_per_cell),
                signals: SignalField::new(w, h, config.communication.max_signals),
                config,
                rng: ChaCha8Rng::seed_from_u64(12),
            }
        }

        fn run(&mut self, agent: &mut Agent, others: &mut [Agent]) -> AgentEvents {
            let mut ctx = TickContext {
                config: &self.config,
                field: &mut self.field,
                signals: &mut self.signals,
                neighbors: Neighbors::new(others, Default::default()),
                rng: &mut self.rng,
            };
            update_agent(agent, &mut ctx)
        }
    }

    fn quiet_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.features.neural_networks = false;
        config
    }

    #[test]
    fn test_feature_flags_shape_agent() {
        let mut config = quiet_config();
        config.features.memory = false;
        config.features.directional_sensing = false;
        config.features.social = false;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let agent = create_agent(Species::Prey, Position { x: 1, y: 2 }, &config, &mut rng, 7);
        assert!(agent.memory.is_none());
        assert!(agent.facing.is_none());
        assert!(agent.social.is_none());
        assert_eq!(agent.birth_tick, 7);
        assert_eq!(agent.energy, 200.0);
    }

    #[test]
    fn test_ids_are_reproducible() {
        let config = quiet_config();
        let mut a = ChaCha8Rng::seed_from_u64(5);
        let mut b = ChaCha8Rng::seed_from_u64(5);
        let x = spawn_random_agent(Species::Prey, &config, &mut a, 0);
        let y = spawn_random_agent(Species::Prey, &config, &mut b, 0);
        assert_eq!(x, y);
    }

    #[test]
    fn test_predator_upkeep_is_higher() {
        let mut world = World::new(quiet_config());
        let mut predator = create_agent(
            Species::Predator,
            Position { x: 0, y: 0 },
            &world.config,
            &mut world.rng,
            0,
        );
        predator.genome.move_probability = 0.0;
        predator.genome.eat_threshold = 1000.0;
        world.run(&mut predator, &mut []);
        assert_eq!(predator.energy, 200.0 - 0.75);
        assert_eq!(predator.age, 1);
    }

    #[test]
    fn test_memory_records_rich_cell() {
        let mut world = World::new(quiet_config());
        world.field.set(4, 4, 80.0);
        let mut agent = create_agent(
            Species::Prey,
            Position { x: 4, y: 4 },
            &world.config,
            &mut world.rng,
            0,
        );
        agent.genome.move_probability = 0.0;
        world.run(&mut agent, &mut []);
        let memory = agent.memory.as_ref().unwrap();
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.best().map(|e| e.energy), Some(80.0));
    }

    #[test]
    fn test_old_age_zeroes_energy() {
        let mut world = World::new(quiet_config());
        let mut agent = create_agent(
            Species::Prey,
            Position { x: 0, y: 0 },
            &world.config,
            &mut world.rng,
            0,
        );
        agent.age = world.config.metabolism.max_age;
        let events = world.run(&mut agent, &mut []);
        assert!(events.died_of_age);
        assert!(agent.is_dead());
    }

    #[test]
    fn test_neighbors_iterate_both_halves() {
        let config = quiet_config();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut agents: Vec<Agent> = (0..5)
            .map(|_| spawn_random_agent(Species::Prey, &config, &mut rng, 0))
            .collect();
        let ids: Vec<_> = agents.iter().map(Agent::id).collect();
        let (before, rest) = agents.split_at_mut(2);
        let (_me, after) = rest.split_first_mut().unwrap();
        let neighbors = Neighbors::new(before, after);
        assert_eq!(neighbors.len(), 4);
        let seen: Vec<_> = neighbors.iter().map(Agent::id).collect();
        assert_eq!(seen, vec![ids[0], ids[1], ids[3], ids[4]]);
    }
}
