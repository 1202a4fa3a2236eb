pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};

pub use crate::core::{
    engine::{generate_default, generate_lpm_data, GenerationEngine, DEFAULT_SEED},
    pipeline::LpmPipeline,
};
pub use domain::model::{
    BoundaryLine, Datasets, GenerationRequest, LinearFit, Observation, RunReport,
};
pub use utils::error::{LpmError, Result};
