//! Two-color text renderer for the terminal.

use life_core::{RenderConfig, Result, RuleVariant};
use life_world::{frame_order, Grid, Renderer};
use std::io::{self, Stdout, Write};
use std::thread;
use tracing::debug;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws each snapshot as a frame of glyphs, pausing between frames
pub struct TerminalRenderer<W: Write> {
    out: W,
    config: RenderConfig,
    title: String,
    clear: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout(config: RenderConfig, rule: RuleVariant) -> Self {
        Self::new(io::stdout(), config, rule, true)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: RenderConfig, rule: RuleVariant, clear: bool) -> Self {
        let rules = match rule {
            RuleVariant::Standard => "standard rules",
            RuleVariant::BirthOnTwo => "birth-on-two rules (B23/S23)",
        };
        Self {
            out,
            config,
            title: format!("Conway's game of life, {rules}, random initialisation."),
            clear,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_frame(&mut self, generation: usize, grid: &Grid) -> Result<()> {
        let mut frame = String::with_capacity((grid.cols() + 1) * (grid.rows() + 2));
        if self.clear {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(&self.title);
        frame.push('\n');

        for row in grid.row_slices() {
            frame.extend(row.iter().map(|cell| {
                if cell.is_alive() {
                    self.config.alive_glyph
                } else {
                    self.config.dead_glyph
                }
            }));
            frame.push('\n');
        }
        frame.push_str(&format!("t={generation}\n"));

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, snapshots: &[Grid]) -> Result<()> {
        let interval = self.config.frame_interval();
        let config = self.config.clone();
        let mut frames = 0usize;

        for (generation, grid) in frame_order(snapshots, &config) {
            self.draw_frame(generation, grid)?;
            frames += 1;
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }

        debug!(frames, snapshots = snapshots.len(), "Rendering finished");
        Ok(())
    }
}
