//! # Genesis Core
//!
//! The simulation engine for GENESIS, a discrete-time artificial-life world.
//!
//! This crate contains the deterministic simulation logic:
//! - The renewable energy field on a toroidal grid
//! - Genomes, fixed-topology neural brains and their mutation operators
//! - The per-agent lifecycle (sensing, decision, movement, eating, reproduction)
//! - Predation, transient signalling, kin recognition and colony adhesion
//! - Tick orchestration with population governance
//! - Metrics collection and structured logging
//!
//! Every stochastic operation takes an explicit RNG handle; a universe built
//! from the same config and seed replays identically.
//!
//! ## Example
//!
//! ```
//! use genesis_core::config::AppConfig;
//! use genesis_core::universe::{TickOutcome, Universe};
//!
//! let mut config = AppConfig::default();
//! config.world.seed = Some(42);
//! let mut universe = Universe::new(config).unwrap();
//! for _ in 0..10 {
//!     if universe.update() == TickOutcome::Halt {
//!         break;
//!     }
//! }
//! println!("population: {}", universe.get_stats().population);
//! ```

/// Fixed-topology feed-forward brains
pub mod brain;
/// Configuration management for simulation parameters
pub mod config;
/// Renewable energy resource grid
pub mod energy_field;
/// Genome construction, mutation and kinship
pub mod genome;
/// Toroidal arithmetic and the vision cone
pub mod geometry;
/// Agent creation and the per-tick lifecycle
pub mod lifecycle;
/// Performance metrics and logging setup
pub mod metrics;
/// Transient broadcast signals
pub mod signal;
/// Serialisable universe state
pub mod snapshot;
/// Per-agent systems: perception, action, predation, reproduction, stats
pub mod systems;
/// Tick orchestration
pub mod universe;

pub use universe::{TickOutcome, Universe};
