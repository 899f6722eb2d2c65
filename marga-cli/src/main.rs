//! Marga - grid pathway finding front-end.
//!
//! Generates a map from the selected input module, runs the sequential and
//! batch-parallel solvers over it, cross-checks their optimal costs and
//! prints the solution. Exit status is 0 for a completed query (with or
//! without a path), 1 for configuration or back-end errors and 2 for a
//! cross-solver mismatch.

mod config;
mod error;
mod render;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use marga_core::{
    Driver, MapSource, OpenMapSource, PreparedMap, RandomMapSource, SearchError, SearchResult,
    prepare,
};

use config::{Cli, FileConfig, InputModule, RunConfig};
use error::Result;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("marga=info".parse().unwrap())
                .add_directive("marga_core=info".parse().unwrap()),
        )
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            FileConfig::load(path)?
        }
        None if Path::new("marga.toml").exists() => {
            info!("Loading configuration from marga.toml");
            FileConfig::load(Path::new("marga.toml"))?
        }
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(&cli, file)?;

    info!("Marga v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Grid {}x{}, input module {:?}, batch width {}",
        config.width, config.height, config.input_module, config.batch_width
    );

    let map = generate_map(&config)?;
    info!(
        "Query: ({}, {}) -> ({}, {})",
        map.start.x, map.start.y, map.target.x, map.target.y
    );

    let driver = Driver::new(config.driver_config());
    let report = match driver.run(&map.grid, map.start, map.target) {
        Ok(report) => report,
        Err(SearchError::CostMismatch {
            sequential,
            parallel,
        }) => {
            error!(
                "Solvers disagree: sequential {:?} vs parallel {:?}",
                sequential, parallel
            );
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(sequential) = &report.sequential {
        print_result("sequential", sequential);
    }
    if let Some(parallel) = &report.parallel {
        print_result("parallel", parallel);
        info!(
            "Parallel solver: {} rounds, {} expansions",
            parallel.stats.rounds, parallel.stats.nodes_expanded
        );
    }

    if let Some(svg_path) = &config.svg_path {
        let path = report.solution().map(|s| s.path.as_slice()).unwrap_or(&[]);
        render::save_svg(&map.grid, map.start, map.target, path, svg_path)?;
        info!("SVG saved to {:?}", svg_path);
    }

    Ok(ExitCode::SUCCESS)
}

/// Build the grid and endpoints from the configured input module.
fn generate_map(config: &RunConfig) -> Result<PreparedMap> {
    let mut source: Box<dyn MapSource> = match config.input_module {
        InputModule::Random => Box::new(RandomMapSource::new(
            config.width,
            config.height,
            config.edge_probability,
            config.seed,
        )?),
        InputModule::Open => Box::new(OpenMapSource::new(config.width, config.height)),
    };
    let map = prepare(config.width, config.height, source.as_mut())?;
    Ok(map)
}

/// Print one solver's solution the way the text consumer expects it.
fn print_result(name: &str, result: &SearchResult) {
    if !result.success {
        warn!("No solution from the {} solver", name);
        return;
    }

    println!("Solution from the {} solver:", name);
    print!("\t");
    for (count, coord) in result.path.iter().enumerate() {
        if count > 0 {
            print!(" -> ");
        }
        if (count + 1) % 10 == 0 {
            print!("\n\t");
        }
        print!("({} {})", coord.x, coord.y);
    }
    println!();
    println!(" > Optimal distance from the {} solver: {:.3}", name, result.cost);
}
