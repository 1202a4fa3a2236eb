pub mod assembler;
pub mod boundary;
pub mod csv_output;
pub mod engine;
pub mod generator;
pub mod pipeline;
pub mod plot;

pub use crate::domain::model::{
    Boundaries, BoundaryLine, Datasets, GenerationRequest, LinearFit, Observation, RunReport,
    SubsetParams,
};
pub use crate::domain::ports::{Pipeline, Storage};
pub use crate::utils::error::Result;
