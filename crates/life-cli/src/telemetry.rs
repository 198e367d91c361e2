//! Logging setup for the command-line runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,life_world=debug";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter and `LIFE_LOG_FORMAT=json` switches
/// to JSON lines. Logs go to stderr so rendered frames own stdout.
pub fn init_telemetry() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let json = matches!(std::env::var("LIFE_LOG_FORMAT").as_deref(), Ok("json"));

    let (plain_layer, json_layer) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_target(true).with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain_layer)
        .with(json_layer)
        .try_init()?;

    info!(json, "Telemetry initialized");
    Ok(())
}
