use super::direction::Direction;
use super::genome::{Color, Genome, BRAIN_OUTPUTS};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Species tag. Both share one lifecycle; predators additionally hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Species {
    #[default]
    Prey,
    Predator,
}

/// Grid cell occupied by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

/// Unique identification of an agent. `parent_id` is a lineage tag only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
}

/// Remembered energy-rich location.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub x: u16,
    pub y: u16,
    pub energy: f64,
}

/// Bounded FIFO of remembered locations; the oldest entry is evicted first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub capacity: usize,
    pub entries: VecDeque<MemoryEntry>,
}

impl Memory {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn remember(&mut self, entry: MemoryEntry) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Highest-energy entry; the earliest wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&MemoryEntry> {
        self.entries.iter().fold(None, |best, e| match best {
            Some(b) if b.energy >= e.energy => Some(b),
            _ => Some(e),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Kin the agent has recognised so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct SocialState {
    pub known_kin: Vec<Uuid>,
}

/// A living organism on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub identity: Identity,
    pub position: Position,
    /// May dip below zero inside a tick; the agent is dead once `energy <= 0`.
    pub energy: f64,
    pub age: u64,
    pub species: Species,
    pub genome: Genome,
    pub facing: Option<Direction>,
    pub memory: Option<Memory>,
    pub social: Option<SocialState>,
    pub colony_id: Option<Uuid>,
    pub birth_tick: u64,
    pub offspring_count: u32,
    /// Raw outputs of the last brain evaluation. Saved with the agent.
    pub last_outputs: Option<[f32; BRAIN_OUTPUTS]>,
}

impl Agent {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.identity.id
    }

    #[must_use]
    pub fn position(&self) -> (u16, u16) {
        (self.position.x, self.position.y)
    }

    #[must_use]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.genome.color
    }

    #[must_use]
    pub fn species(&self) -> Species {
        self.species
    }

    #[must_use]
    pub fn is_predator(&self) -> bool {
        self.species == Species::Predator
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.energy <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_evicts_oldest() {
        let mut memory = Memory::new(2);
        for i in 0..3u16 {
            memory.remember(MemoryEntry {
                x: i,
                y: 0,
                energy: f64::from(i),
            });
        }
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.entries.front().map(|e| e.x), Some(1));
    }

    #[test]
    fn test_memory_best_prefers_first_on_tie() {
        let mut memory = Memory::new(4);
        memory.remember(MemoryEntry { x: 1, y: 1, energy: 80.0 });
        memory.remember(MemoryEntry { x: 2, y: 2, energy: 90.0 });
        memory.remember(MemoryEntry { x: 3, y: 3, energy: 90.0 });
        assert_eq!(memory.best().map(|e| e.x), Some(2));
    }

    #[test]
    fn test_zero_capacity_memory_stays_empty() {
        let mut memory = Memory::new(0);
        memory.remember(MemoryEntry { x: 0, y: 0, energy: 1.0 });
        assert!(memory.is_empty());
    }
}
