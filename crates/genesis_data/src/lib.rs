//! Plain data types shared across the GENESIS workspace.
//!
//! Everything here is serialisable state. Behaviour lives in `genesis_core`
//! as extension traits over these types.

pub mod data;

pub use data::agent::{Agent, Identity, Memory, MemoryEntry, Position, SocialState, Species};
pub use data::direction::Direction;
pub use data::genome::{
    Color, CommunicationGenes, GeneTrait, Genome, Layer, NeuralBrain, SocialGenes, BRAIN_INPUTS,
    BRAIN_OUTPUTS,
};
pub use data::signal::{Signal, SignalKind};
pub use data::stats::UniverseStats;
