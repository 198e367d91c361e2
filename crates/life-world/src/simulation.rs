//! Update rule and simulation engine.

use crate::grid::Grid;
use life_core::{DecisionTable, Error, Result, Rule, RunConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

const PROGRESS_INTERVAL: usize = 50;

/// Apply `rule` once to every interior cell of `grid`.
///
/// The outermost ring is never evaluated and is always dead in the result.
/// The input grid is left untouched.
pub fn step<R: Rule + ?Sized>(grid: &Grid, rule: &R) -> Grid {
    let mut next = grid.blank_like();

    for coord in grid.interior() {
        let current = grid.get(coord).unwrap_or_default();
        let live_neighbors = grid.live_neighbors(coord);
        next.set_unchecked(coord, rule.next_state(current, live_neighbors));
    }

    next
}

/// Produce `timesteps` snapshots, starting with `initial`.
///
/// Zero timesteps yields an empty sequence.
pub fn simulate<R: Rule + ?Sized>(initial: Grid, timesteps: usize, rule: &R) -> Vec<Grid> {
    Generations::new(initial, rule).take(timesteps).collect()
}

/// Unbounded iterator over successive generations, beginning with the initial grid.
///
/// Only the most recent grid is retained, so consumers that do not need the
/// full history can stream snapshots without collecting them. Each step is
/// computed when the following generation is requested.
pub struct Generations<'r, R: Rule + ?Sized> {
    initial: Option<Grid>,
    last: Option<Grid>,
    rule: &'r R,
}

impl<'r, R: Rule + ?Sized> Generations<'r, R> {
    pub fn new(initial: Grid, rule: &'r R) -> Self {
        Self {
            initial: Some(initial),
            last: None,
            rule,
        }
    }
}

impl<R: Rule + ?Sized> Iterator for Generations<'_, R> {
    type Item = Grid;

    fn next(&mut self) -> Option<Grid> {
        let grid = match self.initial.take() {
            Some(initial) => initial,
            None => step(self.last.as_ref()?, self.rule),
        };
        self.last = Some(grid.clone());
        Some(grid)
    }
}

/// Population of a single snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub population: usize,
}

/// A seeded run: initial grid, rule table and step count
pub struct Simulation {
    initial: Grid,
    table: DecisionTable,
    config: RunConfig,
}

impl Simulation {
    /// Seed the initial grid from the configured seed, or from entropy when none is set
    pub fn new(config: RunConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Seed the initial grid from a caller-provided random source
    pub fn with_rng<R: Rng>(config: RunConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let initial = Grid::seed(
            config.world.rows,
            config.world.cols,
            config.world.live_cells,
            rng,
        )?;
        Ok(Self::from_initial(config, initial))
    }

    /// Run from an explicit initial grid; the configured world size is replaced by the grid's
    pub fn from_initial(mut config: RunConfig, initial: Grid) -> Self {
        config.world.rows = initial.rows();
        config.world.cols = initial.cols();
        Self {
            table: config.rule.table(),
            initial,
            config,
        }
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Compute every snapshot for the configured number of timesteps
    #[instrument(skip(self), fields(timesteps = self.config.timesteps, rule = ?self.config.rule))]
    pub fn run(&self) -> SimulationResult {
        info!(
            rows = self.initial.rows(),
            cols = self.initial.cols(),
            population = self.initial.population(),
            "Simulating t={}",
            self.config.timesteps
        );

        let mut snapshots = Vec::with_capacity(self.config.timesteps);
        let mut stats = Vec::with_capacity(self.config.timesteps);

        let generations = Generations::new(self.initial.clone(), &self.table);
        for (generation, grid) in generations.take(self.config.timesteps).enumerate() {
            let population = grid.population();
            trace!(generation, population, "Stepped");

            if generation % PROGRESS_INTERVAL == 0 {
                debug!(
                    "Generation {}/{}: {} cells alive",
                    generation, self.config.timesteps, population
                );
            }

            stats.push(GenerationStats {
                generation,
                population,
            });
            snapshots.push(grid);
        }

        let result = SimulationResult { snapshots, stats };
        result.emit_summary();
        result
    }
}

/// Snapshots and per-generation statistics of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub snapshots: Vec<Grid>,
    pub stats: Vec<GenerationStats>,
}

impl SimulationResult {
    /// Largest population seen and the first generation it occurred in
    pub fn peak(&self) -> Option<GenerationStats> {
        self.stats
            .iter()
            .copied()
            .reduce(|best, s| if s.population > best.population { s } else { best })
    }

    /// First generation with no live cells
    pub fn extinction_generation(&self) -> Option<usize> {
        self.stats
            .iter()
            .find(|s| s.population == 0)
            .map(|s| s.generation)
    }

    /// Snapshot at `generation`
    pub fn snapshot(&self, generation: usize) -> Result<&Grid> {
        self.snapshots.get(generation).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "generation {generation} outside run of {} snapshots",
                self.snapshots.len()
            ))
        })
    }

    fn emit_summary(&self) {
        let final_population = self.stats.last().map(|s| s.population).unwrap_or(0);
        let peak = self.peak();

        info!(
            event = "run_summary",
            snapshots = self.snapshots.len(),
            final_population,
            peak_population = peak.map(|p| p.population).unwrap_or(0),
            peak_generation = peak.map(|p| p.generation).unwrap_or(0),
            extinct_at = ?self.extinction_generation(),
            "Simulation complete"
        );
    }
}
