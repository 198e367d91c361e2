//! Core types and utilities for the Game of Life simulator.

pub mod types;
pub mod config;
pub mod error;
pub mod rule;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use rule::*;
