//! Renewable energy resource laid out on a toroidal grid.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Toroidal grid of per-cell energy, each value clamped to `[0, max_per_cell]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnergyField {
    pub width: u16,
    pub height: u16,
    pub max_per_cell: f64,
    cells: Vec<f64>,
    total_consumed: f64,
}

impl EnergyField {
    /// Creates an empty field.
    ///
    /// # Panics
    /// When `width` or `height` is zero.
    #[must_use]
    pub fn new(width: u16, height: u16, max_per_cell: f64) -> Self {
        assert!(
            width > 0 && height > 0,
            "energy field needs a non-empty grid, got {width}x{height}"
        );
        Self {
            width,
            height,
            max_per_cell,
            cells: vec![0.0; usize::from(width) * usize::from(height)],
            total_consumed: 0.0,
        }
    }

    /// Rebuilds a field from raw cells, clamping every value into range.
    pub fn from_cells(
        width: u16,
        height: u16,
        max_per_cell: f64,
        cells: Vec<f64>,
        total_consumed: f64,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "Energy field must be non-empty");
        anyhow::ensure!(
            cells.len() == usize::from(width) * usize::from(height),
            "Energy field has {} cells, expected {}x{}",
            cells.len(),
            width,
            height
        );
        let cells = cells
            .into_iter()
            .map(|v| v.clamp(0.0, max_per_cell))
            .collect();
        Ok(Self {
            width,
            height,
            max_per_cell,
            cells,
            total_consumed,
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> usize {
        let x = x.rem_euclid(i32::from(self.width)) as usize;
        let y = y.rem_euclid(i32::from(self.height)) as usize;
        y * usize::from(self.width) + x
    }

    /// Sets each cell to `amount` with probability `distribution`, else zero.
    pub fn seed_initial<R: Rng>(&mut self, rng: &mut R, distribution: f64, amount: f64) {
        let value = amount.clamp(0.0, self.max_per_cell);
        for cell in &mut self.cells {
            *cell = if rng.gen::<f64>() < distribution {
                value
            } else {
                0.0
            };
        }
    }

    /// Adds `amount` to each cell with probability `spawn_rate`, saturating at the cap.
    pub fn replenish<R: Rng>(&mut self, rng: &mut R, spawn_rate: f64, amount: f64) {
        let cap = self.max_per_cell;
        for cell in &mut self.cells {
            if rng.gen::<f64>() < spawn_rate {
                *cell = (*cell + amount).clamp(0.0, cap);
            }
        }
    }

    /// Energy at `(x, y)` after wrapping.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> f64 {
        self.cells[self.index(x, y)]
    }

    /// Overwrites a cell, clamped into `[0, max_per_cell]`.
    pub fn set(&mut self, x: i32, y: i32, value: f64) {
        let idx = self.index(x, y);
        self.cells[idx] = value.clamp(0.0, self.max_per_cell);
    }

    /// Sets every cell to `value` (clamped).
    pub fn fill(&mut self, value: f64) {
        let value = value.clamp(0.0, self.max_per_cell);
        self.cells.iter_mut().for_each(|c| *c = value);
    }

    /// Removes up to `amount` from the cell and returns what was taken.
    pub fn consume(&mut self, x: i32, y: i32, amount: f64) -> f64 {
        let idx = self.index(x, y);
        let consumed = self.cells[idx].min(amount.max(0.0));
        self.cells[idx] -= consumed;
        self.total_consumed += consumed;
        consumed
    }

    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.cells.iter().sum()
    }

    #[must_use]
    pub fn total_consumed(&self) -> f64 {
        self.total_consumed
    }

    #[must_use]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_get_wraps_coordinates() {
        let mut field = EnergyField::new(4, 3, 500.0);
        field.set(0, 0, 42.0);
        assert_eq!(field.get(4, 3), 42.0);
        assert_eq!(field.get(-4, -3), 42.0);
        field.set(-1, -1, 7.0);
        assert_eq!(field.get(3, 2), 7.0);
    }

    #[test]
    fn test_consume_caps_at_available() {
        let mut field = EnergyField::new(2, 2, 500.0);
        field.set(1, 1, 30.0);
        assert_eq!(field.consume(1, 1, 50.0), 30.0);
        assert_eq!(field.get(1, 1), 0.0);
        assert_eq!(field.consume(1, 1, 10.0), 0.0);
        assert_eq!(field.total_consumed(), 30.0);
    }

    #[test]
    fn test_consume_negative_amount_takes_nothing() {
        let mut field = EnergyField::new(2, 2, 500.0);
        field.set(0, 0, 10.0);
        assert_eq!(field.consume(0, 0, -5.0), 0.0);
        assert_eq!(field.get(0, 0), 10.0);
    }

    #[test]
    fn test_replenish_saturates() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field = EnergyField::new(3, 3, 150.0);
        for _ in 0..5 {
            field.replenish(&mut rng, 1.0, 100.0);
        }
        assert!(field.cells().iter().all(|&v| v == 150.0));
    }

    #[test]
    fn test_seed_initial_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut field = EnergyField::new(5, 5, 500.0);
        field.seed_initial(&mut rng, 0.0, 100.0);
        assert_eq!(field.total_energy(), 0.0);
        field.seed_initial(&mut rng, 1.0, 100.0);
        assert_eq!(field.total_energy(), 2500.0);
    }

    #[test]
    #[should_panic(expected = "non-empty grid")]
    fn test_zero_width_panics() {
        let _ = EnergyField::new(0, 10, 500.0);
    }

    #[test]
    fn test_from_cells_checks_length() {
        assert!(EnergyField::from_cells(2, 2, 500.0, vec![0.0; 3], 0.0).is_err());
        let field = EnergyField::from_cells(2, 1, 100.0, vec![-3.0, 900.0], 0.0).unwrap();
        assert_eq!(field.cells(), &[0.0, 100.0]);
    }
}
