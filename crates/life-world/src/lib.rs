//! World simulation engine.
//!
//! This module implements the finite grid, random seeding, the cell update
//! rule and the loop that turns an initial grid into a snapshot sequence.

pub mod grid;
pub mod render;
pub mod simulation;

pub use grid::Grid;
pub use render::{frame_order, Renderer};
pub use simulation::{simulate, step, GenerationStats, Generations, Simulation, SimulationResult};
