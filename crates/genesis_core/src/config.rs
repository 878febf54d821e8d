//! Configuration management for simulation parameters.
//!
//! Every section maps to a table in `config.toml` and carries its own
//! defaults, so a file only needs the keys it wants to override.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 100
//! height = 100
//! initial_organisms = 10
//! seed = 42
//!
//! [features]
//! predators = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid dimensions, initial population and run-level settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    pub initial_organisms: usize,
    pub initial_predators: usize,
    /// `None` draws a seed from entropy (and logs it).
    pub seed: Option<u64>,
    /// Ticks between periodic stat lines.
    pub log_interval: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            initial_organisms: 10,
            initial_predators: 2,
            seed: None,
            log_interval: 100,
        }
    }
}

/// Renewable energy resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    /// Fraction of cells holding `amount` at start.
    pub initial_distribution: f64,
    /// Per-cell, per-tick chance of receiving `amount`.
    pub spawn_rate: f64,
    pub amount: f64,
    pub max_per_cell: f64,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            initial_distribution: 0.3,
            spawn_rate: 0.01,
            amount: 100.0,
            max_per_cell: 500.0,
        }
    }
}

/// Energy costs and life-cycle thresholds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MetabolismConfig {
    pub start_energy: f64,
    pub cost_alive: f64,
    pub cost_move: f64,
    pub cost_replicate: f64,
    pub min_energy_to_replicate: f64,
    pub max_age: u64,
    pub predator_cost_multiplier: f64,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            start_energy: 200.0,
            cost_alive: 0.5,
            cost_move: 1.0,
            cost_replicate: 150.0,
            min_energy_to_replicate: 200.0,
            max_age: 1000,
            predator_cost_multiplier: 1.5,
        }
    }
}

/// Genome mutation parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub mutation_rate: f64,
    /// Standard deviation for unit-interval traits.
    pub mutation_strength: f64,
    pub eat_threshold_sigma: f64,
    pub reproduce_threshold_sigma: f64,
    pub color_mutation_chance: f64,
    pub color_step: i16,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.1,
            mutation_strength: 0.2,
            eat_threshold_sigma: 10.0,
            reproduce_threshold_sigma: 20.0,
            color_mutation_chance: 0.3,
            color_step: 20,
        }
    }
}

/// Neural network topology and weight mutation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrainConfig {
    pub hidden_layers: Vec<usize>,
    pub mutation_rate: f32,
    pub mutation_strength: f32,
    /// Scale applied to standard-normal initial weights.
    pub weight_scale: f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![8, 8],
            mutation_rate: 0.1,
            mutation_strength: 0.2,
            weight_scale: 0.5,
        }
    }
}

/// Population governor: soft reproduction cap and hard halt ceiling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PopulationConfig {
    pub max_population: usize,
    pub emergency_stop_population: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_population: 10_000,
            emergency_stop_population: 50_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PredationConfig {
    pub spawn_chance: f64,
    /// Predators may not exceed this share of the population when spawning.
    pub max_predator_fraction: f64,
    /// Share of the prey's energy a kill transfers.
    pub energy_transfer: f64,
    pub chase_probability: f64,
    pub kill_alarm_strength: f64,
}

impl Default for PredationConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.001,
            max_predator_fraction: 0.1,
            energy_transfer: 0.5,
            chase_probability: 0.7,
            kill_alarm_strength: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CommunicationConfig {
    pub signal_cost: f64,
    pub max_signals: usize,
    pub decay: f64,
    pub min_strength: f64,
    pub max_age: u32,
    pub range: f64,
    pub response_threshold: f64,
    pub low_energy_threshold: f64,
    pub food_signal_threshold: f64,
}

impl Default for CommunicationConfig {
    fn default() -> Self {
        Self {
            signal_cost: 5.0,
            max_signals: 1000,
            decay: 0.9,
            min_strength: 0.1,
            max_age: 50,
            range: 10.0,
            response_threshold: 0.5,
            low_energy_threshold: 100.0,
            food_signal_threshold: 100.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MemoryConfig {
    pub size: usize,
    /// Only cells richer than this are remembered.
    pub energy_threshold: f64,
    pub recall_probability: f64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: 10,
            energy_threshold: 50.0,
            recall_probability: 0.3,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SensingConfig {
    pub vision_range: u16,
    /// Full cone width in degrees.
    pub vision_cone_angle: f64,
    pub turn_cost: f64,
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            vision_range: 5,
            vision_cone_angle: 180.0,
            turn_cost: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SocialConfig {
    pub kin_threshold: f64,
    pub kin_check_probability: f64,
    pub max_known_kin: usize,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            kin_threshold: 0.8,
            kin_check_probability: 0.1,
            max_known_kin: 32,
        }
    }
}

/// Multicellular adhesion between parent and offspring.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AdhesionConfig {
    pub chance: f64,
    pub max_organism_size: usize,
}

impl Default for AdhesionConfig {
    fn default() -> Self {
        Self {
            chance: 0.01,
            max_organism_size: 5,
        }
    }
}

/// Optional subsystems. Each flag is read once when agents are built.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FeaturesConfig {
    pub neural_networks: bool,
    pub predators: bool,
    pub communication: bool,
    pub memory: bool,
    pub directional_sensing: bool,
    pub social: bool,
    pub multicellular: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            neural_networks: true,
            predators: true,
            communication: true,
            memory: true,
            directional_sensing: true,
            social: true,
            multicellular: true,
        }
    }
}

/// Top-level configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub energy: EnergyConfig,
    pub metabolism: MetabolismConfig,
    pub evolution: EvolutionConfig,
    pub brain: BrainConfig,
    pub population: PopulationConfig,
    pub predation: PredationConfig,
    pub communication: CommunicationConfig,
    pub memory: MemoryConfig,
    pub sensing: SensingConfig,
    pub social: SocialConfig,
    pub adhesion: AdhesionConfig,
    pub features: FeaturesConfig,
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl AppConfig {
    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    /// Checks ranges and cross-field constraints.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.width <= 1000, "World width too large (max 1000)");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.height <= 1000,
            "World height too large (max 1000)"
        );
        anyhow::ensure!(self.world.log_interval > 0, "Log interval must be positive");

        anyhow::ensure!(
            is_probability(self.energy.initial_distribution),
            "Initial energy distribution must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.energy.spawn_rate),
            "Energy spawn rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.energy.amount >= 0.0, "Energy amount must be non-negative");
        anyhow::ensure!(
            self.energy.max_per_cell > 0.0,
            "Max energy per cell must be positive"
        );

        anyhow::ensure!(
            self.metabolism.start_energy > 0.0,
            "Start energy must be positive"
        );
        anyhow::ensure!(
            self.metabolism.cost_alive >= 0.0,
            "Cost of living must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.cost_move >= 0.0,
            "Move cost must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.cost_replicate >= 0.0,
            "Replication cost must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.min_energy_to_replicate >= 0.0,
            "Minimum replication energy must be non-negative"
        );
        anyhow::ensure!(
            self.metabolism.predator_cost_multiplier >= 0.0,
            "Predator cost multiplier must be non-negative"
        );

        anyhow::ensure!(
            is_probability(self.evolution.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.evolution.mutation_strength >= 0.0,
            "Mutation strength must be non-negative"
        );
        anyhow::ensure!(
            self.evolution.eat_threshold_sigma >= 0.0
                && self.evolution.reproduce_threshold_sigma >= 0.0,
            "Threshold mutation sigmas must be non-negative"
        );
        anyhow::ensure!(
            is_probability(self.evolution.color_mutation_chance),
            "Color mutation chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.evolution.color_step >= 0,
            "Color step must be non-negative"
        );

        anyhow::ensure!(
            self.brain.hidden_layers.iter().all(|&n| n > 0),
            "Hidden layers must have at least one neuron"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.brain.mutation_rate),
            "Brain mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.brain.mutation_strength >= 0.0 && self.brain.weight_scale >= 0.0,
            "Brain mutation strength and weight scale must be non-negative"
        );

        anyhow::ensure!(
            self.population.max_population <= self.population.emergency_stop_population,
            "Max population must not exceed the emergency stop population"
        );

        anyhow::ensure!(
            is_probability(self.predation.spawn_chance),
            "Predator spawn chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.predation.max_predator_fraction),
            "Max predator fraction must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.predation.energy_transfer),
            "Energy transfer must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.predation.chase_probability),
            "Chase probability must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.communication.signal_cost >= 0.0,
            "Signal cost must be non-negative"
        );
        anyhow::ensure!(
            self.communication.decay > 0.0 && self.communication.decay < 1.0,
            "Signal decay must be in (0.0, 1.0)"
        );
        anyhow::ensure!(
            self.communication.range > 0.0,
            "Signal range must be positive"
        );

        anyhow::ensure!(
            is_probability(self.memory.recall_probability),
            "Recall probability must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            self.sensing.vision_cone_angle > 0.0 && self.sensing.vision_cone_angle <= 360.0,
            "Vision cone angle must be in (0, 360]"
        );
        anyhow::ensure!(
            self.sensing.turn_cost >= 0.0,
            "Turn cost must be non-negative"
        );

        anyhow::ensure!(
            is_probability(self.social.kin_threshold),
            "Kin threshold must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            is_probability(self.social.kin_check_probability),
            "Kin check probability must be in [0.0, 1.0]"
        );

        anyhow::ensure!(
            is_probability(self.adhesion.chance),
            "Adhesion chance must be in [0.0, 1.0]"
        );

        Ok(())
    }

    /// SHA-256 of the simulation-relevant sections, hex encoded.
    ///
    /// Logging cadence and the seed are excluded so saves can be resumed with
    /// a different log interval.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};

        let mut relevant = self.clone();
        relevant.world.seed = None;
        relevant.world.log_interval = 0;
        let mut hasher = Sha256::new();
        if let Ok(bytes) = serde_json::to_vec(&relevant) {
            hasher.update(&bytes);
        }
        hex::encode(hasher.finalize())
    }
}
