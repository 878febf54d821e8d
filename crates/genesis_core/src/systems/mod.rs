//! Per-agent systems invoked by the lifecycle and the universe tick.

pub mod action;
pub mod communication;
pub mod perception;
pub mod predation;
pub mod reproduction;
pub mod social;
pub mod stats;
