//! Validated JSON and HexDNA helpers.
//!
//! HexDNA is hex-encoded JSON and is the exchange format for single genomes.

use crate::error::{IoError, Result};
use genesis_core::brain::BrainLogic;
use genesis_data::Genome;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {e}")))
}

pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {e}")))
}

/// Parses JSON, rejecting blank input up front.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON document"));
    }
    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {e}")))
}

pub fn to_hex_dna<T: Serialize>(data: &T) -> Result<String> {
    Ok(hex::encode(to_json(data)?))
}

pub fn from_hex_dna<T>(hex_str: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let hex_str = hex_str.trim();
    if hex_str.is_empty() {
        return Err(IoError::validation("Empty hex string"));
    }
    let bytes = hex::decode(hex_str)
        .map_err(|e| IoError::validation(format!("Invalid hex encoding: {e}")))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| IoError::validation(format!("Invalid UTF-8 in hex: {e}")))?;
    from_json(&json)
}

/// Encodes a genome as HexDNA.
pub fn export_genome(genome: &Genome) -> Result<String> {
    to_hex_dna(genome)
}

/// Decodes HexDNA into a genome and checks its brain topology.
pub fn import_genome(hex_str: &str) -> Result<Genome> {
    let genome: Genome = from_hex_dna(hex_str)?;
    if let Some(brain) = &genome.brain {
        brain
            .validate()
            .map_err(|e| IoError::validation(format!("Imported brain is malformed: {e}")))?;
    }
    Ok(genome)
}

/// Writes pretty JSON through a temporary sibling file, then renames it into
/// place so readers never observe a half-written save.
pub fn write_json_file<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let json = to_json_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("writing {}", tmp.display())))?;
    std::fs::rename(&tmp, path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("renaming to {}", path.display())))?;
    Ok(())
}

pub fn read_json_file<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let json = std::fs::read_to_string(path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("reading {}", path.display())))?;
    from_json(&json).map_err(|e| e.with_context(format!("parsing {}", path.display())))
}
