//! Positional command-line arguments and configuration layering.

use life_core::{Error, Result, RunConfig};

pub const USAGE: &str = "\
Usage: life-sim [GRID_SIZE] [LIVE_CELLS] [TIMESTEPS]

  GRID_SIZE   side length of the square grid (default 150)
  LIVE_CELLS  random live-cell draws for the initial grid (default 100)
  TIMESTEPS   snapshots to simulate, including the initial grid (default 250)

Environment:
  LIFE_CONFIG      JSON run configuration loaded before arguments are applied
  LIFE_SEED        seed for reproducible initial grids
  LIFE_LOG_FORMAT  set to `json` for JSON log lines
  RUST_LOG         log filter";

/// Parsed positional arguments; unset values keep the configured ones
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub grid_size: Option<usize>,
    pub live_cells: Option<usize>,
    pub timesteps: Option<usize>,
    pub help: bool,
}

impl CliArgs {
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = CliArgs::default();
        let mut positional = Vec::new();

        for arg in args {
            match arg.as_ref() {
                "-h" | "--help" => parsed.help = true,
                value => positional.push(value.to_string()),
            }
        }

        if positional.len() > 3 {
            return Err(Error::InvalidArgument(format!(
                "expected at most 3 arguments, got {}",
                positional.len()
            )));
        }

        let mut values = positional.iter();
        parsed.grid_size = values.next().map(|v| parse_count("GRID_SIZE", v)).transpose()?;
        parsed.live_cells = values.next().map(|v| parse_count("LIVE_CELLS", v)).transpose()?;
        parsed.timesteps = values.next().map(|v| parse_count("TIMESTEPS", v)).transpose()?;

        if parsed.grid_size == Some(0) {
            return Err(Error::InvalidArgument("GRID_SIZE must be positive".to_string()));
        }

        Ok(parsed)
    }

    /// Override `config` with any arguments that were given
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(size) = self.grid_size {
            config.world.rows = size;
            config.world.cols = size;
        }
        if let Some(live_cells) = self.live_cells {
            config.world.live_cells = live_cells;
        }
        if let Some(timesteps) = self.timesteps {
            config.timesteps = timesteps;
        }
    }
}

fn parse_count(name: &str, value: &str) -> Result<usize> {
    let number: i64 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("{name} must be an integer, got {value:?}")))?;

    usize::try_from(number)
        .map_err(|_| Error::InvalidArgument(format!("{name} must not be negative, got {number}")))
}

/// Defaults, then the `LIFE_CONFIG` file, then `LIFE_SEED`
pub fn load_config() -> Result<RunConfig> {
    load_config_from(
        std::env::var("LIFE_CONFIG").ok(),
        std::env::var("LIFE_SEED").ok(),
    )
}

/// Layer an optional JSON config file and an optional seed over the defaults
pub fn load_config_from(config_path: Option<String>, seed: Option<String>) -> Result<RunConfig> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(seed) = seed {
        let seed = seed
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("LIFE_SEED must be a u64, got {seed:?}")))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args, CliArgs::default());

        let mut config = RunConfig::default();
        args.apply(&mut config);
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn test_positional_arguments() {
        let args = CliArgs::parse(["40", "25", "10"]).unwrap();
        assert_eq!(args.grid_size, Some(40));
        assert_eq!(args.live_cells, Some(25));
        assert_eq!(args.timesteps, Some(10));

        let mut config = RunConfig::default();
        args.apply(&mut config);
        assert_eq!(config.world.rows, 40);
        assert_eq!(config.world.cols, 40);
        assert_eq!(config.world.live_cells, 25);
        assert_eq!(config.timesteps, 10);
    }

    #[test]
    fn test_partial_arguments() {
        let args = CliArgs::parse(["60"]).unwrap();
        let mut config = RunConfig::default();
        args.apply(&mut config);
        assert_eq!(config.world.rows, 60);
        assert_eq!(config.world.live_cells, 100);
        assert_eq!(config.timesteps, 250);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(CliArgs::parse(["-5"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(CliArgs::parse(["10", "-1"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(CliArgs::parse(["0"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(CliArgs::parse(["ten"]), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            CliArgs::parse(["1", "2", "3", "4"]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_grid_fails_validation() {
        let mut config = RunConfig::default();
        CliArgs::parse(["5000000000"]).unwrap().apply(&mut config);
        assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_timesteps_allowed() {
        let args = CliArgs::parse(["10", "5", "0"]).unwrap();
        assert_eq!(args.timesteps, Some(0));
    }

    fn write_config(name: &str, json: &str) -> String {
        let path = std::env::temp_dir().join(format!("life-sim-{}-{name}.json", std::process::id()));
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_config_layering() {
        let path = write_config(
            "layering",
            r#"{ "timesteps": 40, "seed": 1, "world": { "rows": 30, "cols": 20, "live_cells": 12 } }"#,
        );

        let config = load_config_from(Some(path.clone()), Some(" 99 ".to_string())).unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.timesteps, 40);
        assert_eq!(config.world.rows, 30);
        assert_eq!(config.world.cols, 20);
        assert_eq!(config.world.live_cells, 12);

        let mut config = load_config_from(Some(path.clone()), None).unwrap();
        assert_eq!(config.seed, Some(1));

        CliArgs::parse(["50", "7"]).unwrap().apply(&mut config);
        assert_eq!(config.world.rows, 50);
        assert_eq!(config.world.cols, 50);
        assert_eq!(config.world.live_cells, 7);
        assert_eq!(config.timesteps, 40);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        assert_eq!(load_config_from(None, None).unwrap(), RunConfig::default());
    }

    #[test]
    fn test_invalid_seed_is_config_error() {
        let result = load_config_from(None, Some("not-a-seed".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let result = load_config_from(Some("/nonexistent/life.json".to_string()), None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_help_flag() {
        let args = CliArgs::parse(["--help"]).unwrap();
        assert!(args.help);
    }
}
