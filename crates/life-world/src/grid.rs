//! Finite 2D grid of cells.

use life_core::{CellState, Coord, Direction, Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// A fixed-size, row-major grid of cell states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = Error;

    fn try_from(raw: RawGrid) -> Result<Self> {
        let len = check_dimensions(raw.rows, raw.cols)?;
        if raw.cells.len() != len {
            return Err(Error::InvalidArgument(format!(
                "expected {} cells for a {}x{} grid, got {}",
                len,
                raw.rows,
                raw.cols,
                raw.cells.len()
            )));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

/// Number of cells in a `rows x cols` grid, rejecting empty or overflowing sizes
fn check_dimensions(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidArgument(format!(
            "grid dimensions must be positive, got {rows}x{cols}"
        )));
    }
    rows.checked_mul(cols).ok_or_else(|| {
        Error::InvalidArgument(format!("grid of {rows}x{cols} cells overflows"))
    })
}

impl Grid {
    /// All-dead grid of the given size
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = check_dimensions(rows, cols)?;
        Ok(Self::blank(rows, cols, len))
    }

    /// All-dead grid with the same dimensions as `self`
    pub(crate) fn blank_like(&self) -> Self {
        Self::blank(self.rows, self.cols, self.cells.len())
    }

    fn blank(rows: usize, cols: usize, len: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Dead; len],
        }
    }

    /// Seed a grid with `live_count` uniformly random draws.
    ///
    /// Coordinates are sampled with replacement, so colliding draws collapse
    /// into one live cell and the realized population may be lower than
    /// requested. Border cells are not avoided.
    pub fn seed<R: Rng>(
        rows: usize,
        cols: usize,
        live_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let capacity = check_dimensions(rows, cols)?;

        if live_count > capacity {
            warn!(
                live_count,
                capacity,
                "Requested more live cells than the grid holds; duplicates will collapse"
            );
        }

        let mut grid = Self::blank(rows, cols, capacity);
        for _ in 0..live_count {
            let coord = Coord::new(rng.gen_range(0..rows), rng.gen_range(0..cols));
            let index = grid.index(coord);
            grid.cells[index] = CellState::Alive;
        }

        debug!(
            rows,
            cols,
            requested = live_count,
            realized = grid.population(),
            "Seeded initial grid"
        );

        Ok(grid)
    }

    /// Parse a grid from text rows, `#` or `O` for alive and anything else for dead
    pub fn from_pattern(lines: &[&str]) -> Result<Self> {
        let rows = lines.len();
        let cols = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        let len = check_dimensions(rows, cols)?;

        let mut cells = Vec::with_capacity(len);
        for (row, line) in lines.iter().enumerate() {
            let before = cells.len();
            cells.extend(line.chars().map(|c| CellState::from(c == '#' || c == 'O')));
            if cells.len() - before != cols {
                return Err(Error::InvalidArgument(format!(
                    "pattern row {row} has {} cells, expected {cols}",
                    cells.len() - before
                )));
            }
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell state at `coord`, or `None` when out of range
    pub fn get(&self, coord: Coord) -> Option<CellState> {
        coord
            .in_bounds(self.rows, self.cols)
            .then(|| self.cells[self.index(coord)])
    }

    /// Binary accessor for renderers; out-of-range cells read as dead
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(Coord::new(row, col))
            .is_some_and(CellState::is_alive)
    }

    /// Set the cell at `coord`
    pub fn set(&mut self, coord: Coord, state: CellState) -> Result<()> {
        if !coord.in_bounds(self.rows, self.cols) {
            return Err(Error::InvalidArgument(format!(
                "coordinate ({}, {}) outside {}x{} grid",
                coord.row, coord.col, self.rows, self.cols
            )));
        }
        let index = self.index(coord);
        self.cells[index] = state;
        Ok(())
    }

    /// Builder-style `set` for constructing fixtures
    pub fn with_alive(mut self, coords: impl IntoIterator<Item = impl Into<Coord>>) -> Result<Self> {
        for coord in coords {
            self.set(coord.into(), CellState::Alive)?;
        }
        Ok(self)
    }

    /// Live cells among the eight Moore neighbors; neighbors outside the grid count as dead
    pub fn live_neighbors(&self, coord: Coord) -> u8 {
        Direction::all()
            .iter()
            .filter_map(|direction| {
                let (dr, dc) = direction.to_delta();
                coord.offset(dr, dc)
            })
            .filter_map(|neighbor| self.get(neighbor))
            .map(CellState::as_count)
            .sum()
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Coordinates of live cells, row-major
    pub fn live_cells(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Iterator over interior coordinates (every cell not on the outermost ring)
    pub fn interior(&self) -> impl Iterator<Item = Coord> + '_ {
        let last_col = self.cols.saturating_sub(1);
        (1..self.rows.saturating_sub(1))
            .flat_map(move |row| (1..last_col).map(move |col| Coord::new(row, col)))
    }

    /// Iterator over all cells with coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (self.index_to_coord(i), cell))
    }

    /// Rows of the grid as slices, top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.cols)
    }

    pub(crate) fn set_unchecked(&mut self, coord: Coord, state: CellState) {
        let index = self.index(coord);
        self.cells[index] = state;
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }

    fn index_to_coord(&self, index: usize) -> Coord {
        Coord::new(index / self.cols, index % self.cols)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_slices() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10, 12).unwrap();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.cols(), 12);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.iter().count(), 120);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(Grid::new(0, 5), Err(Error::InvalidArgument(_))));
        assert!(matches!(Grid::new(5, 0), Err(Error::InvalidArgument(_))));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            Grid::seed(0, 0, 10, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert!(matches!(
            Grid::new(usize::MAX, 2),
            Err(Error::InvalidArgument(_))
        ));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            Grid::seed(5_000_000_000, 5_000_000_000, 1, &mut rng),
            Err(Error::InvalidArgument(_))
        ));

        let oversized = format!(r#"{{ "rows": {}, "cols": 2, "cells": [] }}"#, usize::MAX);
        assert!(serde_json::from_str::<Grid>(&oversized).is_err());
    }

    #[test]
    fn test_get_and_set() {
        let mut grid = Grid::new(3, 4).unwrap();
        grid.set(Coord::new(2, 3), CellState::Alive).unwrap();
        assert_eq!(grid.get(Coord::new(2, 3)), Some(CellState::Alive));
        assert!(grid.is_alive(2, 3));
        assert_eq!(grid.get(Coord::new(3, 0)), None);
        assert!(!grid.is_alive(3, 0));
        assert!(grid.set(Coord::new(0, 4), CellState::Alive).is_err());
    }

    #[test]
    fn test_seed_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = Grid::seed(20, 30, 50, &mut rng).unwrap();
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 30);
        assert!(grid.population() <= 50);
        assert!(grid.population() > 0);
    }

    #[test]
    fn test_seed_collisions_collapse() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = Grid::seed(2, 2, 100, &mut rng).unwrap();
        assert!(grid.population() <= 4);
    }

    #[test]
    fn test_seed_single_cell_grid() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = Grid::seed(1, 1, 1, &mut rng).unwrap();
        assert!(grid.is_alive(0, 0));
    }

    #[test]
    fn test_seed_zero_live_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let grid = Grid::seed(5, 5, 0, &mut rng).unwrap();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_seed_is_reproducible() {
        let a = Grid::seed(15, 15, 40, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = Grid::seed(15, 15, 40, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let c = Grid::seed(15, 15, 40, &mut ChaCha8Rng::seed_from_u64(100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_pattern() {
        let grid = Grid::from_pattern(&[".#.", "..#", "###"]).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.population(), 5);
        assert!(grid.is_alive(0, 1));
        assert!(!grid.is_alive(0, 0));
        assert_eq!(grid.to_string(), ".#.\n..#\n###\n");

        assert!(Grid::from_pattern(&["..", "..."]).is_err());
        assert!(Grid::from_pattern(&[]).is_err());
    }

    #[test]
    fn test_live_neighbors() {
        let grid = Grid::from_pattern(&["###", "#.#", "###"]).unwrap();
        assert_eq!(grid.live_neighbors(Coord::new(1, 1)), 8);
        assert_eq!(grid.live_neighbors(Coord::new(0, 0)), 2);

        let grid = Grid::from_pattern(&["#..", ".#.", "..."]).unwrap();
        assert_eq!(grid.live_neighbors(Coord::new(1, 1)), 1);
        assert_eq!(grid.live_neighbors(Coord::new(0, 1)), 2);
    }

    #[test]
    fn test_live_cells() {
        let grid = Grid::from_pattern(&["..#", "#..", "..."]).unwrap();
        assert_eq!(grid.live_cells(), vec![Coord::new(0, 2), Coord::new(1, 0)]);
    }

    #[test]
    fn test_interior() {
        let grid = Grid::new(4, 5).unwrap();
        let interior: Vec<_> = grid.interior().collect();
        assert_eq!(interior.len(), 6);
        assert!(interior.iter().all(|c| !c.is_border(4, 5)));

        assert_eq!(Grid::new(2, 9).unwrap().interior().count(), 0);
        assert_eq!(Grid::new(1, 1).unwrap().interior().count(), 0);
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let grid = Grid::from_pattern(&["#.", ".#"]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);

        let bad = r#"{ "rows": 2, "cols": 2, "cells": ["Dead"] }"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());
    }
}
