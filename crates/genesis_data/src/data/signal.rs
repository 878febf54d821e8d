use serde::{Deserialize, Serialize};

/// Meaning carried by a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    Alarm,
    Food,
    Mating,
}

/// Transient broadcast emitted at a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub x: u16,
    pub y: u16,
    pub kind: SignalKind,
    pub strength: f64,
    pub age: u32,
}

impl Signal {
    pub const DEFAULT_STRENGTH: f64 = 1.0;

    #[must_use]
    pub fn new(x: u16, y: u16, kind: SignalKind) -> Self {
        Self::with_strength(x, y, kind, Self::DEFAULT_STRENGTH)
    }

    #[must_use]
    pub fn with_strength(x: u16, y: u16, kind: SignalKind, strength: f64) -> Self {
        Self {
            x,
            y,
            kind,
            strength,
            age: 0,
        }
    }
}
