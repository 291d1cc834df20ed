//! Inning × batting-slot accumulators.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

use crate::domain::{BattingSlot, LINEUP_SIZE};

/// Regulation innings in a game.
pub const INNINGS: usize = 9;

/// A 9×9 grid of values indexed by (inning, batting slot).
///
/// Rows are innings 1–9, columns are batting slots 1–9. Used both for summed
/// expected runs and for the plate-appearance indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InningGrid {
    cells: [[f64; LINEUP_SIZE]; INNINGS],
}

impl Default for InningGrid {
    fn default() -> Self {
        Self::zeros()
    }
}

impl InningGrid {
    pub fn zeros() -> Self {
        Self {
            cells: [[0.0; LINEUP_SIZE]; INNINGS],
        }
    }

    /// `inning` is 1-based.
    pub fn get(&self, inning: usize, slot: BattingSlot) -> f64 {
        self.cells[inning - 1][slot.index()]
    }

    pub fn set(&mut self, inning: usize, slot: BattingSlot, value: f64) {
        self.cells[inning - 1][slot.index()] = value;
    }

    pub fn add(&mut self, inning: usize, slot: BattingSlot, value: f64) {
        self.cells[inning - 1][slot.index()] += value;
    }

    pub fn rows(&self) -> &[[f64; LINEUP_SIZE]; INNINGS] {
        &self.cells
    }

    /// Sum of every cell.
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Row sums, one per inning.
    pub fn inning_totals(&self) -> [f64; INNINGS] {
        self.cells.map(|row| row.iter().sum::<f64>())
    }

    /// Column sums, one per batting slot.
    pub fn slot_totals(&self) -> [f64; LINEUP_SIZE] {
        let mut totals = [0.0; LINEUP_SIZE];
        for row in &self.cells {
            for (total, value) in totals.iter_mut().zip(row) {
                *total += value;
            }
        }
        totals
    }

    /// Divide every cell by `divisor`.
    pub fn scaled(&self, divisor: f64) -> Self {
        Self {
            cells: self.cells.map(|row| row.map(|v| v / divisor)),
        }
    }
}

impl AddAssign<&InningGrid> for InningGrid {
    fn add_assign(&mut self, other: &InningGrid) {
        for (row, other_row) in self.cells.iter_mut().zip(&other.cells) {
            for (cell, value) in row.iter_mut().zip(other_row) {
                *cell += value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u8) -> BattingSlot {
        BattingSlot::new(n).unwrap()
    }

    #[test]
    fn add_accumulates_set_overwrites() {
        let mut grid = InningGrid::zeros();
        grid.add(1, slot(1), 0.25);
        grid.add(1, slot(1), 0.25);
        assert_eq!(grid.get(1, slot(1)), 0.5);

        grid.set(2, slot(3), 1.0);
        grid.set(2, slot(3), 1.0);
        assert_eq!(grid.get(2, slot(3)), 1.0);
    }

    #[test]
    fn totals_by_inning_and_slot() {
        let mut grid = InningGrid::zeros();
        grid.add(1, slot(1), 1.0);
        grid.add(1, slot(9), 2.0);
        grid.add(9, slot(9), 4.0);

        assert_eq!(grid.total(), 7.0);
        assert_eq!(grid.inning_totals()[0], 3.0);
        assert_eq!(grid.inning_totals()[8], 4.0);
        assert_eq!(grid.slot_totals()[8], 6.0);
        assert_eq!(grid.slot_totals()[0], 1.0);
    }

    #[test]
    fn add_assign_is_elementwise() {
        let mut a = InningGrid::zeros();
        a.add(3, slot(4), 1.5);
        let mut b = InningGrid::zeros();
        b.add(3, slot(4), 0.5);
        b.add(5, slot(2), 2.0);

        a += &b;
        assert_eq!(a.get(3, slot(4)), 2.0);
        assert_eq!(a.get(5, slot(2)), 2.0);
    }

    #[test]
    fn scaled_divides_every_cell() {
        let mut grid = InningGrid::zeros();
        grid.add(1, slot(1), 10.0);
        grid.add(9, slot(9), 5.0);
        let avg = grid.scaled(5.0);
        assert_eq!(avg.get(1, slot(1)), 2.0);
        assert_eq!(avg.get(9, slot(9)), 1.0);
    }
}
