//! Save file management for universe snapshots.
//!
//! Each save `<name>` is a pair of files in the save directory:
//! `<name>.json` holding the full [`UniverseSnapshot`] and `<name>_meta.json`
//! holding a small [`SaveMetadata`] record used for listing.

use crate::error::{IoError, Result};
use crate::serialization::{read_json_file, write_json_file};
use chrono::{DateTime, Utc};
use genesis_core::snapshot::UniverseSnapshot;
use genesis_data::UniverseStats;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const META_SUFFIX: &str = "_meta.json";
const AUTOSAVE_PREFIX: &str = "autosave_tick_";

/// Summary stored next to every save.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveMetadata {
    pub name: String,
    pub tick: u64,
    pub population: usize,
    pub timestamp: DateTime<Utc>,
    pub config_fingerprint: String,
    pub stats: UniverseStats,
}

/// Reads and writes saves inside one directory.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    /// Opens `dir`, creating it if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating {}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    fn meta_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}{META_SUFFIX}"))
    }

    fn check_name(name: &str) -> Result<()> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !name.starts_with('.');
        if valid {
            Ok(())
        } else {
            Err(IoError::validation(format!("Invalid save name {name:?}")))
        }
    }

    /// Writes the snapshot and its metadata. Returns the snapshot path.
    pub fn save(&self, snapshot: &UniverseSnapshot, name: &str) -> Result<PathBuf> {
        Self::check_name(name)?;
        let path = self.snapshot_path(name);
        write_json_file(snapshot, &path)?;

        let meta = SaveMetadata {
            name: name.to_string(),
            tick: snapshot.tick,
            population: snapshot.population(),
            timestamp: Utc::now(),
            config_fingerprint: snapshot.config_fingerprint.clone(),
            stats: snapshot.stats.clone(),
        };
        write_json_file(&meta, self.meta_path(name))?;

        tracing::info!(
            name,
            tick = snapshot.tick,
            population = meta.population,
            path = %path.display(),
            "Universe saved"
        );
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<UniverseSnapshot> {
        Self::check_name(name)?;
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Err(IoError::not_found(name));
        }
        let snapshot: UniverseSnapshot = read_json_file(&path)?;
        tracing::info!(name, tick = snapshot.tick, "Universe loaded");
        Ok(snapshot)
    }

    pub fn metadata(&self, name: &str) -> Result<SaveMetadata> {
        Self::check_name(name)?;
        read_json_file(self.meta_path(name))
    }

    /// All saves with readable metadata, newest first.
    pub fn list_saves(&self) -> Result<Vec<SaveMetadata>> {
        let mut saves = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.ends_with(META_SUFFIX) {
                continue;
            }
            match read_json_file::<SaveMetadata, _>(&path) {
                Ok(meta) => saves.push(meta),
                Err(e) => tracing::warn!(file = file_name, error = %e, "Skipping unreadable save metadata"),
            }
        }
        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.tick.cmp(&a.tick)));
        Ok(saves)
    }

    /// Removes a save and its metadata.
    pub fn delete(&self, name: &str) -> Result<()> {
        Self::check_name(name)?;
        let snapshot = self.snapshot_path(name);
        if !snapshot.exists() {
            return Err(IoError::not_found(name));
        }
        std::fs::remove_file(snapshot)?;
        let meta = self.meta_path(name);
        if meta.exists() {
            std::fs::remove_file(meta)?;
        }
        Ok(())
    }

    /// True on positive multiples of `interval`; an interval of 0 disables autosave.
    #[must_use]
    pub fn autosave_due(tick: u64, interval: u64) -> bool {
        interval > 0 && tick > 0 && tick % interval == 0
    }

    /// Saves `autosave_tick_<tick>` on multiples of `interval`, then keeps only
    /// the newest `keep` autosaves. Returns the saved path, if any.
    pub fn autosave(
        &self,
        snapshot: &UniverseSnapshot,
        interval: u64,
        keep: usize,
    ) -> Result<Option<PathBuf>> {
        if !Self::autosave_due(snapshot.tick, interval) {
            return Ok(None);
        }
        let path = self.save(snapshot, &format!("{AUTOSAVE_PREFIX}{}", snapshot.tick))?;
        self.cleanup_autosaves(keep)?;
        Ok(Some(path))
    }

    /// Deletes all but the `keep` most recent autosaves (by tick).
    pub fn cleanup_autosaves(&self, keep: usize) -> Result<usize> {
        let mut autosaves: Vec<(u64, String)> = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let Some(stem) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_suffix(".json"))
            else {
                continue;
            };
            if stem.ends_with("_meta") {
                continue;
            }
            if let Some(tick) = stem
                .strip_prefix(AUTOSAVE_PREFIX)
                .and_then(|t| t.parse::<u64>().ok())
            {
                autosaves.push((tick, stem.to_string()));
            }
        }

        autosaves.sort_by(|a, b| b.0.cmp(&a.0));
        let stale: Vec<_> = autosaves.into_iter().skip(keep).collect();
        for (_, name) in &stale {
            self.delete(name)?;
            tracing::debug!(name, "Removed old autosave");
        }
        Ok(stale.len())
    }
}
