use rand::Rng;
use std::collections::HashSet;

use super::grid::{Grid, Position};

/// Random draws per grid cell before falling back to a scan
const SAMPLES_PER_CELL: usize = 4;

/// The single piece of food on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Create food on a random cell not in `occupied`
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Position>,
    ) -> Option<Self> {
        free_cell(rng, grid, occupied).map(Self::new)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move to a random cell not in `occupied` and return it.
    ///
    /// Uniform rejection sampling, capped so a nearly full grid cannot spin
    /// forever; past the cap the first free cell in row order is taken. When
    /// every cell is occupied the food stays put and `None` is returned.
    pub fn relocate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Position>,
    ) -> Option<Position> {
        let position = free_cell(rng, grid, occupied)?;
        self.position = position;
        Some(position)
    }
}

fn free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let n = grid.size() as i32;
    if n == 0 {
        return None;
    }

    for _ in 0..grid.cell_count() * SAMPLES_PER_CELL {
        let pos = Position::new(rng.gen_range(0..n), rng.gen_range(0..n));
        if !occupied.contains(&pos) {
            return Some(pos);
        }
    }

    grid.cells().find(|pos| !occupied.contains(pos))
}
