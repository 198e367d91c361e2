//! Configuration types for the simulation.

use crate::{Error, Result, RuleVariant};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// World configuration parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Number of random live-cell draws when seeding
    pub live_cells: usize,
}

impl WorldConfig {
    /// Square world of `size x size` cells
    pub fn square(size: usize, live_cells: usize) -> Self {
        Self {
            rows: size,
            cols: size,
            live_cells,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::square(150, 100)
    }
}

/// Frame playback parameters for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pause between frames (milliseconds)
    pub frame_interval_ms: u64,
    /// Play at most this many snapshots; `None` plays all of them
    pub max_frames: Option<usize>,
    /// Replay the sequence after the last frame
    pub looping: bool,
    /// Number of passes when looping
    pub loops: usize,
    /// Glyph drawn for live cells
    pub alive_glyph: char,
    /// Glyph drawn for dead cells
    pub dead_glyph: char,
}

impl RenderConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Number of passes over the sequence a renderer should make
    pub fn passes(&self) -> usize {
        if self.looping {
            self.loops.max(1)
        } else {
            1
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 500,
            max_frames: Some(20),
            looping: false,
            loops: 1,
            alive_glyph: '█',
            dead_glyph: ' ',
        }
    }
}

/// Complete configuration for a single run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of snapshots to produce, including the initial grid
    pub timesteps: usize,
    /// Random seed for reproducibility; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Update rule
    pub rule: RuleVariant,
    /// World configuration
    pub world: WorldConfig,
    /// Renderer configuration
    pub render: RenderConfig,
}

impl RunConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the seeder cannot build a grid for
    pub fn validate(&self) -> Result<()> {
        if self.world.rows == 0 || self.world.cols == 0 {
            return Err(Error::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                self.world.rows, self.world.cols
            )));
        }
        if self.world.rows.checked_mul(self.world.cols).is_none() {
            return Err(Error::InvalidArgument(format!(
                "grid of {}x{} cells overflows",
                self.world.rows, self.world.cols
            )));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timesteps: 250,
            seed: None,
            rule: RuleVariant::Standard,
            world: WorldConfig::default(),
            render: RenderConfig::default(),
        }
    }
}
