//! Command-line runner: seed a grid, simulate it and play it back in the terminal.

mod args;
mod telemetry;
mod terminal;

use anyhow::Result;
use life_world::{Renderer, Simulation};
use tracing::info;

fn main() -> Result<()> {
    let cli = args::CliArgs::parse(std::env::args().skip(1))?;
    if cli.help {
        println!("{}", args::USAGE);
        return Ok(());
    }

    telemetry::init_telemetry()?;

    let mut config = args::load_config()?;
    cli.apply(&mut config);
    config.validate()?;

    println!(
        "Generating initial conditions: {} initial cells, {}x{} grid..",
        config.world.live_cells, config.world.rows, config.world.cols
    );
    let simulation = Simulation::new(config.clone())?;
    info!(
        seed = ?config.seed,
        population = simulation.initial().population(),
        "Initial grid ready"
    );

    println!("Simulating t={}..", config.timesteps);
    let result = simulation.run();

    let mut renderer = terminal::TerminalRenderer::stdout(config.render.clone(), config.rule);
    renderer.render(&result.snapshots)?;

    info!("Done");
    Ok(())
}
