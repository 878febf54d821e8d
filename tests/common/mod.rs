pub mod macros;

use genesis_data::{Agent, Position, Species};
use genesis_lib::model::config::AppConfig;
use genesis_lib::model::lifecycle;
use genesis_lib::model::Universe;

type AgentMod = Box<dyn FnOnce(&mut Agent)>;

/// Builds a universe with no random initial population so scenarios control
/// exactly who is alive.
#[allow(dead_code)]
pub struct UniverseBuilder {
    config: AppConfig,
    agents: Vec<(Species, Position, AgentMod)>,
    field_energy: Option<f64>,
    cells: Vec<(i32, i32, f64)>,
}

#[allow(dead_code)]
impl UniverseBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_organisms = 0;
        config.world.initial_predators = 0;
        config.world.seed = Some(0);
        Self {
            config,
            agents: Vec::new(),
            field_energy: None,
            cells: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Switches off every source of energy and agents the scenario did not ask for.
    pub fn quiet(self) -> Self {
        self.with_config(|c| {
            c.energy.spawn_rate = 0.0;
            c.energy.initial_distribution = 0.0;
            c.features.predators = false;
            c.features.neural_networks = false;
            c.features.communication = false;
            c.features.multicellular = false;
        })
    }

    pub fn with_agent<F>(mut self, species: Species, x: u16, y: u16, modifier: F) -> Self
    where
        F: FnOnce(&mut Agent) + 'static,
    {
        self.agents
            .push((species, Position { x, y }, Box::new(modifier)));
        self
    }

    pub fn with_uniform_energy(mut self, energy: f64) -> Self {
        self.field_energy = Some(energy);
        self
    }

    pub fn with_cell_energy(mut self, x: i32, y: i32, energy: f64) -> Self {
        self.cells.push((x, y, energy));
        self
    }

    pub fn build(self) -> Universe {
        let mut universe =
            Universe::new(self.config).expect("Failed to create universe in test builder");
        if let Some(energy) = self.field_energy {
            universe.field_mut().fill(energy);
        }
        for (x, y, energy) in self.cells {
            universe.field_mut().set(x, y, energy);
        }

        let config = universe.config().clone();
        for (species, position, modifier) in self.agents {
            let mut agent = lifecycle::create_agent(species, position, &config, universe.rng_mut(), 0);
            modifier(&mut agent);
            universe.insert_agent(agent);
        }
        universe
    }
}

/// Stops an agent from acting on its own: no movement, no signals, no
/// offspring.
#[allow(dead_code)]
pub fn pin(agent: &mut Agent) {
    agent.genome.move_probability = 0.0;
    agent.genome.reproduce_threshold = f64::MAX;
    if let Some(comm) = agent.genome.communication.as_mut() {
        comm.signal_probability = 0.0;
    }
}
