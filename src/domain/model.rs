use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_finite, validate_non_empty_string, validate_non_negative,
    validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One labeled point. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
    pub value: u8,
    pub group: String,
}

/// Distribution parameters for one subset of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetParams {
    pub count: usize,
    pub mean_x: f64,
    pub mean_y: f64,
    pub sd_x: f64,
    pub sd_y: f64,
    pub rho: f64,
    pub value: u8,
    pub group: String,
}

impl Validate for SubsetParams {
    fn validate(&self) -> Result<()> {
        validate_finite("mean_x", self.mean_x)?;
        validate_finite("mean_y", self.mean_y)?;
        validate_non_negative("sd_x", self.sd_x)?;
        validate_non_negative("sd_y", self.sd_y)?;
        validate_range("rho", self.rho, -1.0, 1.0)?;
        validate_range("value", self.value, 0, 1)?;
        validate_non_empty_string("group", &self.group)?;
        Ok(())
    }
}

/// The two dataset variants of a run. `without_extremes` is always a prefix
/// of `with_extremes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub without_extremes: Vec<Observation>,
    pub with_extremes: Vec<Observation>,
}

/// Coefficients of `value ~ weight_x * x + weight_y * y + bias`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub weight_x: f64,
    pub weight_y: f64,
    pub bias: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryLine {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub label: String,
}

/// Boundary lines of a run and the x-range they span.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundaries {
    pub x_range: (f64, f64),
    pub lines: Vec<BoundaryLine>,
}

/// Everything a run needs besides the random source and the storage backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub normal_count: usize,
    pub extreme_count: usize,
    pub label1: String,
    pub label2: String,
    pub save_data: bool,
    pub save_plot: bool,
    pub data_file: String,
    pub plot_file: String,
    /// Drop a boundary whose fit is degenerate instead of aborting the run.
    pub omit_degenerate_boundaries: bool,
}

pub const DEFAULT_NORMAL_COUNT: usize = 60;
pub const DEFAULT_EXTREME_COUNT: usize = 2;
pub const DEFAULT_LABEL1: &str = "Group 1";
pub const DEFAULT_LABEL2: &str = "Group 2";
pub const DEFAULT_DATA_FILE: &str = "dataset.csv";
pub const DEFAULT_PLOT_FILE: &str = "dataPlot.pdf";

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            normal_count: DEFAULT_NORMAL_COUNT,
            extreme_count: DEFAULT_EXTREME_COUNT,
            label1: DEFAULT_LABEL1.to_string(),
            label2: DEFAULT_LABEL2.to_string(),
            save_data: true,
            save_plot: true,
            data_file: DEFAULT_DATA_FILE.to_string(),
            plot_file: DEFAULT_PLOT_FILE.to_string(),
            omit_degenerate_boundaries: false,
        }
    }
}

impl Validate for GenerationRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("label1", &self.label1)?;
        validate_non_empty_string("label2", &self.label2)?;
        if self.save_data {
            validate_path("output.data_file", &self.data_file)?;
            validate_file_extension("output.data_file", &self.data_file, &["csv"])?;
        }
        if self.save_plot {
            validate_path("output.plot_file", &self.plot_file)?;
            validate_file_extension("output.plot_file", &self.plot_file, &["pdf", "svg"])?;
        }
        Ok(())
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub rows_without_extremes: usize,
    pub rows_with_extremes: usize,
    pub x_range: (f64, f64),
    pub boundaries: Vec<BoundaryLine>,
    pub written: Vec<PathBuf>,
}
