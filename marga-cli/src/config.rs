//! Configuration loading for the marga front-end.
//!
//! A TOML file supplies defaults; command-line flags override individual
//! values. Width and height must come from one of the two, otherwise the run
//! is rejected.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use marga_core::{BatchConfig, DriverConfig, SolverSelection};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Available map sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputModule {
    /// Seeded random connectivity masks.
    #[default]
    Random,
    /// Every in-range edge enabled.
    Open,
}

/// Which solvers to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverChoice {
    Sequential,
    Parallel,
    #[default]
    Both,
}

impl From<SolverChoice> for SolverSelection {
    fn from(choice: SolverChoice) -> Self {
        match choice {
            SolverChoice::Sequential => SolverSelection::SequentialOnly,
            SolverChoice::Parallel => SolverSelection::ParallelOnly,
            SolverChoice::Both => SolverSelection::Both,
        }
    }
}

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "marga", about = "Grid pathway finding with cross-checked solvers")]
pub struct Cli {
    /// Path to a TOML configuration file
    pub config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    pub height: Option<usize>,

    /// Map source module
    #[arg(long, value_enum)]
    pub input_module: Option<InputModule>,

    /// Nodes extracted per round by the parallel solver
    #[arg(long)]
    pub batch_width: Option<usize>,

    /// Seed for deterministic map sources
    #[arg(long)]
    pub seed: Option<u64>,

    /// Probability of keeping each directed edge (random source)
    #[arg(long)]
    pub edge_probability: Option<f64>,

    /// Solvers to run
    #[arg(long, value_enum)]
    pub solvers: Option<SolverChoice>,

    /// Thread count for the parallel solver (default: rayon's global pool)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write an SVG visualisation of the grid and path
    #[arg(long)]
    pub svg: Option<PathBuf>,
}

/// TOML file contents.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub query: QuerySection,
    #[serde(default)]
    pub solver: SolverSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuerySection {
    pub width: Option<usize>,
    pub height: Option<usize>,
    #[serde(default)]
    pub input_module: Option<InputModule>,
    pub seed: Option<u64>,
    pub edge_probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SolverSection {
    #[serde(default)]
    pub mode: Option<SolverChoice>,
    #[serde(default = "default_batch_width")]
    pub batch_width: usize,
    pub threads: Option<usize>,
}

impl Default for SolverSection {
    fn default() -> Self {
        Self {
            mode: None,
            batch_width: default_batch_width(),
            threads: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub svg_path: Option<PathBuf>,
}

fn default_batch_width() -> usize {
    64
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read config file: {}", e)))?;
        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Fully resolved run settings.
#[derive(Debug)]
pub struct RunConfig {
    pub width: usize,
    pub height: usize,
    pub input_module: InputModule,
    pub seed: Option<u64>,
    pub edge_probability: f64,
    pub solvers: SolverChoice,
    pub batch_width: usize,
    pub threads: Option<usize>,
    pub svg_path: Option<PathBuf>,
}

impl RunConfig {
    /// Merge file values with command-line overrides and validate.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let width = cli
            .width
            .or(file.query.width)
            .ok_or_else(|| CliError::Config("grid width is required".into()))?;
        let height = cli
            .height
            .or(file.query.height)
            .ok_or_else(|| CliError::Config("grid height is required".into()))?;
        if width == 0 || height == 0 {
            return Err(CliError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let batch_width = cli.batch_width.unwrap_or(file.solver.batch_width);
        if batch_width == 0 {
            return Err(CliError::Config("batch width must be at least 1".into()));
        }

        Ok(Self {
            width,
            height,
            input_module: cli
                .input_module
                .or(file.query.input_module)
                .unwrap_or_default(),
            seed: cli.seed.or(file.query.seed),
            edge_probability: cli
                .edge_probability
                .or(file.query.edge_probability)
                .unwrap_or(marga_core::RandomMapSource::DEFAULT_EDGE_PROBABILITY),
            solvers: cli.solvers.or(file.solver.mode).unwrap_or_default(),
            batch_width,
            threads: cli.threads.or(file.solver.threads),
            svg_path: cli.svg.clone().or(file.output.svg_path),
        })
    }

    /// Driver configuration for this run.
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            solvers: self.solvers.into(),
            batch: BatchConfig {
                batch_width: self.batch_width,
                threads: self.threads,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("marga").chain(args.iter().copied()))
    }

    #[test]
    fn test_flags_only() {
        let config =
            RunConfig::resolve(&cli(&["--width", "32", "--height", "24"]), FileConfig::default())
                .unwrap();
        assert_eq!(config.width, 32);
        assert_eq!(config.height, 24);
        assert_eq!(config.input_module, InputModule::Random);
        assert_eq!(config.solvers, SolverChoice::Both);
        assert_eq!(config.batch_width, 64);
    }

    #[test]
    fn test_missing_dimensions_rejected() {
        let result = RunConfig::resolve(&cli(&["--width", "32"]), FileConfig::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let result = RunConfig::resolve(
            &cli(&["--width", "0", "--height", "5"]),
            FileConfig::default(),
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_file_values_with_flag_override() {
        let file: FileConfig = toml::from_str(
            r#"
            [query]
            width = 100
            height = 80
            input_module = "open"
            seed = 12

            [solver]
            mode = "parallel"
            batch_width = 128
            "#,
        )
        .unwrap();

        let config = RunConfig::resolve(&cli(&["--width", "50"]), file).unwrap();
        assert_eq!(config.width, 50);
        assert_eq!(config.height, 80);
        assert_eq!(config.input_module, InputModule::Open);
        assert_eq!(config.solvers, SolverChoice::Parallel);
        assert_eq!(config.batch_width, 128);
        assert_eq!(config.seed, Some(12));
    }

    #[test]
    fn test_unknown_input_module_rejected() {
        let result: std::result::Result<FileConfig, _> = toml::from_str(
            r#"
            [query]
            input_module = "maze"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_batch_width_rejected() {
        let result = RunConfig::resolve(
            &cli(&["--width", "4", "--height", "4", "--batch-width", "0"]),
            FileConfig::default(),
        );
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
