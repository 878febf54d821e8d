//! Transient broadcast signals and their capacity-bounded owner.

use crate::config::CommunicationConfig;
use crate::geometry::torus_distance;
use genesis_data::{Signal, SignalKind};
use serde::{Deserialize, Serialize};

/// Decay and spatial falloff of a single [`Signal`].
pub trait SignalLogic {
    /// Applies one tick of decay and ageing.
    fn age_one_tick(&mut self, decay: f64);
    fn is_expired(&self, min_strength: f64, max_age: u32) -> bool;
    /// Strength perceived at `(x, y)`, falling linearly to zero at `range`.
    fn strength_at(&self, x: u16, y: u16, range: f64, width: u16, height: u16) -> f64;
}

impl SignalLogic for Signal {
    fn age_one_tick(&mut self, decay: f64) {
        self.strength *= decay;
        self.age += 1;
    }

    fn is_expired(&self, min_strength: f64, max_age: u32) -> bool {
        self.strength < min_strength || self.age > max_age
    }

    fn strength_at(&self, x: u16, y: u16, range: f64, width: u16, height: u16) -> f64 {
        let distance = torus_distance((self.x, self.y), (x, y), width, height);
        if distance > range {
            0.0
        } else {
            self.strength * (1.0 - distance / range)
        }
    }
}

/// A signal as perceived from a particular cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedSignal {
    pub x: u16,
    pub y: u16,
    pub kind: SignalKind,
    pub strength: f64,
}

/// All live signals, in emission order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SignalField {
    pub width: u16,
    pub height: u16,
    pub capacity: usize,
    signals: Vec<Signal>,
    emitted: u64,
    dropped: u64,
}

impl SignalField {
    #[must_use]
    pub fn new(width: u16, height: u16, capacity: usize) -> Self {
        Self {
            width,
            height,
            capacity,
            signals: Vec::new(),
            emitted: 0,
            dropped: 0,
        }
    }

    /// Adds a signal unless the field is full. Returns whether it was kept.
    pub fn emit(&mut self, signal: Signal) -> bool {
        if self.signals.len() >= self.capacity {
            self.dropped += 1;
            tracing::trace!(kind = ?signal.kind, "Signal dropped at capacity");
            return false;
        }
        self.signals.push(signal);
        self.emitted += 1;
        true
    }

    /// Ages every signal and removes the expired ones.
    pub fn update(&mut self, config: &CommunicationConfig) {
        self.signals.retain_mut(|signal| {
            signal.age_one_tick(config.decay);
            !signal.is_expired(config.min_strength, config.max_age)
        });
    }

    /// Signals perceptible at `(x, y)` above `min_strength`, in emission order.
    #[must_use]
    pub fn sense(&self, x: u16, y: u16, config: &CommunicationConfig) -> Vec<SensedSignal> {
        self.signals
            .iter()
            .filter_map(|s| {
                let strength = s.strength_at(x, y, config.range, self.width, self.height);
                (strength > config.min_strength).then_some(SensedSignal {
                    x: s.x,
                    y: s.y,
                    kind: s.kind,
                    strength,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}
