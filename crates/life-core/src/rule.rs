//! Cell update rules.
//!
//! A rule maps a cell's current state and the number of live cells in its
//! Moore neighborhood to the cell's next state. Rules are stored as an
//! explicit decision table so every `(state, count)` pair has a defined,
//! testable outcome.

use crate::{CellState, Error, Result};
use serde::{Deserialize, Serialize};

/// Largest possible live-neighbor count in a Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Transition function applied to every interior cell on each step
pub trait Rule {
    fn next_state(&self, current: CellState, live_neighbors: u8) -> CellState;
}

/// Selects which decision table a run uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleVariant {
    /// B3/S23: survive on 2 or 3 neighbors, birth on exactly 3
    #[default]
    Standard,
    /// B23/S23: also revives dead cells with exactly 2 neighbors
    BirthOnTwo,
}

impl RuleVariant {
    pub fn table(self) -> DecisionTable {
        match self {
            RuleVariant::Standard => DecisionTable::standard(),
            RuleVariant::BirthOnTwo => DecisionTable::birth_on_two(),
        }
    }
}

/// Lookup from `(current state, live neighbor count)` to the next state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTable {
    dead: [CellState; 9],
    alive: [CellState; 9],
}

impl DecisionTable {
    /// Build a table from the neighbor counts that cause a birth and the
    /// counts that let a live cell survive. Every other entry is `Dead`.
    pub fn from_birth_survive(birth: &[u8], survive: &[u8]) -> Result<Self> {
        let mut table = Self::all_dead();

        for &count in birth {
            let slot = table.dead.get_mut(count as usize).ok_or_else(|| {
                Error::InvalidArgument(format!("birth count {count} exceeds {MAX_NEIGHBORS}"))
            })?;
            *slot = CellState::Alive;
        }

        for &count in survive {
            let slot = table.alive.get_mut(count as usize).ok_or_else(|| {
                Error::InvalidArgument(format!("survival count {count} exceeds {MAX_NEIGHBORS}"))
            })?;
            *slot = CellState::Alive;
        }

        Ok(table)
    }

    pub fn standard() -> Self {
        let mut table = Self::all_dead();
        table.dead[3] = CellState::Alive;
        table.alive[2] = CellState::Alive;
        table.alive[3] = CellState::Alive;
        table
    }

    pub fn birth_on_two() -> Self {
        let mut table = Self::standard();
        table.dead[2] = CellState::Alive;
        table
    }

    fn all_dead() -> Self {
        Self {
            dead: [CellState::Dead; 9],
            alive: [CellState::Dead; 9],
        }
    }

    /// Neighbor counts that turn a dead cell alive
    pub fn birth_counts(&self) -> Vec<u8> {
        Self::alive_counts(&self.dead)
    }

    /// Neighbor counts that keep a live cell alive
    pub fn survive_counts(&self) -> Vec<u8> {
        Self::alive_counts(&self.alive)
    }

    fn alive_counts(row: &[CellState; 9]) -> Vec<u8> {
        (0..=MAX_NEIGHBORS)
            .filter(|&count| row[count as usize].is_alive())
            .collect()
    }
}

impl Default for DecisionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl Rule for DecisionTable {
    fn next_state(&self, current: CellState, live_neighbors: u8) -> CellState {
        let row = match current {
            CellState::Dead => &self.dead,
            CellState::Alive => &self.alive,
        };
        row.get(live_neighbors as usize)
            .copied()
            .unwrap_or(CellState::Dead)
    }
}
