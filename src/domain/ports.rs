use crate::domain::model::{Boundaries, Datasets};
use crate::utils::error::Result;
use std::path::PathBuf;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Writes every `(path, data)` pair, replacing existing files, and returns
    /// the locations written in the same order. Either all files are written
    /// or none of the new contents are left behind.
    fn write_files(&self, files: &[(&str, &[u8])]) -> Result<Vec<PathBuf>>;
}

pub trait Pipeline {
    fn generate(&mut self) -> Result<Datasets>;
    fn fit(&self, datasets: &Datasets) -> Result<Boundaries>;
    fn load(&self, datasets: &Datasets, boundaries: &Boundaries) -> Result<Vec<PathBuf>>;
}
