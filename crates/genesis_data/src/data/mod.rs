//! Core data structures for the GENESIS simulation.

pub mod agent;
pub mod direction;
pub mod genome;
pub mod signal;
pub mod stats;
