use crate::config::AppConfig;
use crate::energy_field::EnergyField;
use crate::signal::SignalField;
use genesis_data::{Agent, Color, Direction, Species, UniverseStats};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current on-disk snapshot layout.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Read-only projection of an agent for renderers and exporters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentView {
    pub id: Uuid,
    pub x: u16,
    pub y: u16,
    pub energy: f64,
    pub color: Color,
    pub species: Species,
    pub facing: Option<Direction>,
    pub generation: u32,
    pub age: u64,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id(),
            x: agent.position.x,
            y: agent.position.y,
            energy: agent.energy,
            color: agent.color(),
            species: agent.species,
            facing: agent.facing,
            generation: agent.genome.generation,
            age: agent.age,
        }
    }
}

/// Complete universe state, sufficient to resume a run bit-for-bit.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UniverseSnapshot {
    pub version: u32,
    pub tick: u64,
    pub seed: u64,
    pub config: AppConfig,
    pub config_fingerprint: String,
    pub field: EnergyField,
    pub signals: SignalField,
    pub agents: Vec<Agent>,
    pub stats: UniverseStats,
    pub rng: ChaCha8Rng,
}

impl UniverseSnapshot {
    #[must_use]
    pub fn population(&self) -> usize {
        self.agents.len()
    }
}
