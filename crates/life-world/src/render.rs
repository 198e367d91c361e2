//! Renderer interface for snapshot sequences.

use crate::grid::Grid;
use life_core::{RenderConfig, Result};

/// Consumes an ordered snapshot sequence and presents it frame by frame
pub trait Renderer {
    fn render(&mut self, snapshots: &[Grid]) -> Result<()>;
}

/// Frames to present for `snapshots` under `config`, as `(generation, grid)` pairs.
///
/// Truncates each pass to `max_frames` and repeats the pass when looping.
pub fn frame_order<'a>(
    snapshots: &'a [Grid],
    config: &RenderConfig,
) -> impl Iterator<Item = (usize, &'a Grid)> + 'a {
    let per_pass = config
        .max_frames
        .map_or(snapshots.len(), |max| max.min(snapshots.len()));

    (0..config.passes()).flat_map(move |_| snapshots.iter().take(per_pass).enumerate())
}
