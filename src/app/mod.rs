//! Headless application loop: builds or restores a universe, advances it,
//! autosaves, and reports why it stopped.

use anyhow::{Context, Result};
use genesis_core::config::AppConfig;
use genesis_core::metrics::mean_duration;
use genesis_core::systems::stats::StatsReport;
use genesis_core::{TickOutcome, Universe};
use genesis_io::SaveManager;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Everything the command line can configure.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub config_path: PathBuf,
    /// Ticks to run; 0 runs until halt or extinction.
    pub ticks: u64,
    pub seed: Option<u64>,
    pub save_dir: PathBuf,
    /// Autosave period in ticks; 0 disables autosaving.
    pub autosave_interval: u64,
    pub keep_autosaves: usize,
    pub load: Option<String>,
    pub save_on_exit: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.toml"),
            ticks: 0,
            seed: None,
            save_dir: PathBuf::from("saves"),
            autosave_interval: 0,
            keep_autosaves: 5,
            load: None,
            save_on_exit: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    TickLimit,
    /// The emergency population ceiling was exceeded.
    Halted,
    Extinct,
}

/// Final report printed when the run ends.
#[derive(Serialize, Debug, Clone)]
pub struct RunSummary {
    pub reason: StopReason,
    pub ticks_run: u64,
    pub elapsed_ms: u128,
    pub avg_tick_us: u128,
    pub stats: StatsReport,
}

pub struct App {
    pub universe: Universe,
    saves: SaveManager,
    options: AppOptions,
}

impl App {
    pub fn new(options: AppOptions) -> Result<Self> {
        let saves = SaveManager::new(&options.save_dir)
            .with_context(|| format!("opening save directory {}", options.save_dir.display()))?;

        let universe = match &options.load {
            Some(name) => {
                let snapshot = saves
                    .load(name)
                    .with_context(|| format!("loading save {name:?}"))?;
                if options.seed.is_some() {
                    tracing::warn!("--seed is ignored when resuming from a save");
                }
                Universe::from_snapshot(snapshot)?
            }
            None => {
                let mut config = AppConfig::load(&options.config_path).with_context(|| {
                    format!("loading config {}", options.config_path.display())
                })?;
                if let Some(seed) = options.seed {
                    config.world.seed = Some(seed);
                }
                Universe::new(config)?
            }
        };

        Ok(Self {
            universe,
            saves,
            options,
        })
    }

    /// Advances one tick and autosaves if due. Returns why the run should
    /// stop, if it should.
    pub fn step(&mut self) -> Result<Option<StopReason>> {
        let outcome = self.universe.update();

        if SaveManager::autosave_due(self.universe.tick(), self.options.autosave_interval) {
            self.saves.autosave(
                &self.universe.snapshot(),
                self.options.autosave_interval,
                self.options.keep_autosaves,
            )?;
        }

        if outcome == TickOutcome::Halt {
            return Ok(Some(StopReason::Halted));
        }
        if self.universe.population() == 0 {
            tracing::warn!(tick = self.universe.tick(), "Population went extinct");
            return Ok(Some(StopReason::Extinct));
        }
        Ok(None)
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        let started = Instant::now();
        let mut ticks_run = 0;

        let reason = loop {
            if self.options.ticks > 0 && ticks_run >= self.options.ticks {
                break StopReason::TickLimit;
            }
            if self.universe.population() == 0 {
                break StopReason::Extinct;
            }
            ticks_run += 1;
            if let Some(reason) = self.step()? {
                break reason;
            }
        };

        if self.options.save_on_exit {
            self.saves.save(&self.universe.snapshot(), "latest")?;
        }

        let elapsed = started.elapsed();
        let avg_tick = mean_duration(elapsed, ticks_run);
        tracing::info!(
            ?reason,
            ticks_run,
            tick = self.universe.tick(),
            population = self.universe.population(),
            "Run finished"
        );
        Ok(RunSummary {
            reason,
            ticks_run,
            elapsed_ms: elapsed.as_millis(),
            avg_tick_us: avg_tick.as_micros(),
            stats: self.universe.get_stats(),
        })
    }

    #[must_use]
    pub fn saves(&self) -> &SaveManager {
        &self.saves
    }
}
