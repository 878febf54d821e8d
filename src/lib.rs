//! GENESIS: a headless artificial-life simulator.
//!
//! The library half of the `genesis` binary. Simulation logic lives in
//! `genesis_core`, persistence in `genesis_io`; this crate wires them into a
//! runnable application.

pub mod app;
pub mod model;
