//! scope - terminal view of a noisy sensor through each filter kind
//!
//! Run with: cargo run --bin scope
//! Set RUST_LOG=debug for filter construction and cutoff changes in scope.log.

mod app;
mod sensor;
mod ui;

use std::fs::File;

use app::Scope;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use one_pole::Approximation;
use sensor::SensorConfig;

const LOG_FILE: &str = "scope.log";

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    Scope::new()
        .cutoff_hz(5.0)
        .approximation(Approximation::Hybrid)
        .sensor(SensorConfig {
            signal_hz: 1.5,
            amplitude: 1.0,
            offset: 0.5,
            noise: 0.25,
            ..SensorConfig::default()
        })
        .run()
}

// The terminal belongs to the UI, so log records go to a file.
fn init_logging() -> EyreResult<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
