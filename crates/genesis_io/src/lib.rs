//! # Genesis IO
//!
//! Persistence layer for the GENESIS simulation.
//!
//! This crate provides:
//! - Structured error handling with a crate-level error type
//! - Validated JSON and HexDNA serialisation helpers
//! - Save/load of universe snapshots with metadata and autosave rotation
//!
//! The simulation core never depends on this crate.

/// Error types and result aliases for I/O operations
pub mod error;
/// Save file management for universe snapshots
pub mod persistence;
/// Validated serialization helpers for JSON and HexDNA formats
pub mod serialization;

pub use error::{IoError, Result};
pub use persistence::{SaveManager, SaveMetadata};
pub use serialization::{
    export_genome, from_hex_dna, from_json, import_genome, read_json_file, to_hex_dna, to_json,
    to_json_pretty, write_json_file,
};
