pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

/// Command line flags. Every flag is optional; with none given the run uses
/// the built-in defaults and writes into the current directory.
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "lpm-outliers"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Binary data with high-leverage outliers and its LPM decision boundary")
)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<PathBuf>,

    /// Directory the CSV and plot are written to
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_dir: Option<String>,

    /// Seed for the random generator
    #[cfg_attr(feature = "cli", arg(long))]
    pub seed: Option<u64>,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub verbose: bool,

    /// Show the planned run without generating or writing anything
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,
}

impl CliConfig {
    /// Applies command line overrides on top of a file configuration.
    pub fn merge_into(&self, mut config: TomlConfig) -> TomlConfig {
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.clone());
        }
        if let Some(seed) = self.seed {
            config.generation.seed = Some(seed);
        }
        if self.verbose {
            config.logging.verbose = Some(true);
        }
        config
    }
}
