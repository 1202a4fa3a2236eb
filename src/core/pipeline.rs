use crate::core::assembler::assemble_datasets;
use crate::core::boundary::{boundary_line, x_range};
use crate::core::csv_output::encode_observations;
use crate::core::plot::{render_plot, PlotConfig, PlotFormat};
use crate::core::{Boundaries, Datasets, GenerationRequest, Pipeline, Result, Storage};
use crate::utils::error::LpmError;
use rand::Rng;
use std::path::PathBuf;

pub const BOUNDARY_WITHOUT_EXTREMES: &str = "Boundary Without Extremes";
pub const BOUNDARY_WITH_EXTREMES: &str = "Boundary With Extremes";

pub struct LpmPipeline<S: Storage, R: Rng> {
    storage: S,
    rng: R,
    request: GenerationRequest,
    plot_config: PlotConfig,
}

impl<S: Storage, R: Rng> LpmPipeline<S, R> {
    pub fn new(storage: S, rng: R, request: GenerationRequest) -> Self {
        Self {
            storage,
            rng,
            request,
            plot_config: PlotConfig::default(),
        }
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: Storage, R: Rng> Pipeline for LpmPipeline<S, R> {
    fn generate(&mut self) -> Result<Datasets> {
        assemble_datasets(
            &mut self.rng,
            self.request.normal_count,
            self.request.extreme_count,
            &self.request.label1,
            &self.request.label2,
        )
    }

    fn fit(&self, datasets: &Datasets) -> Result<Boundaries> {
        let (x_min, x_max) = x_range(&datasets.with_extremes)
            .ok_or_else(|| LpmError::invalid_parameter("no observations were generated"))?;
        tracing::debug!("Boundary x-range: [{:.4}, {:.4}]", x_min, x_max);

        let variants = [
            (&datasets.without_extremes, BOUNDARY_WITHOUT_EXTREMES),
            (&datasets.with_extremes, BOUNDARY_WITH_EXTREMES),
        ];

        let mut lines = Vec::with_capacity(variants.len());
        for (data, label) in variants {
            match boundary_line(data, x_min, x_max, label) {
                Ok(line) => lines.push(line),
                Err(e @ LpmError::DegenerateFit { .. })
                    if self.request.omit_degenerate_boundaries =>
                {
                    tracing::warn!("Omitting '{}': {}", label, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Boundaries {
            x_range: (x_min, x_max),
            lines,
        })
    }

    fn load(&self, datasets: &Datasets, boundaries: &Boundaries) -> Result<Vec<PathBuf>> {
        // Both outputs are encoded up front and committed in one storage call,
        // so a failure in either leaves no partial output behind.
        let csv_data = if self.request.save_data {
            Some(encode_observations(&datasets.with_extremes)?)
        } else {
            None
        };
        let plot_data = if self.request.save_plot {
            let format = PlotFormat::from_path(&self.request.plot_file);
            Some(render_plot(
                &datasets.with_extremes,
                &boundaries.lines,
                &self.plot_config,
                format,
            )?)
        } else {
            None
        };

        let mut files: Vec<(&str, &[u8])> = Vec::with_capacity(2);
        if let Some(data) = &csv_data {
            tracing::debug!("Writing {} bytes of CSV to {}", data.len(), self.request.data_file);
            files.push((self.request.data_file.as_str(), data.as_slice()));
        }
        if let Some(data) = &plot_data {
            tracing::debug!("Writing {} bytes of plot to {}", data.len(), self.request.plot_file);
            files.push((self.request.plot_file.as_str(), data.as_slice()));
        }
        if files.is_empty() {
            return Ok(Vec::new());
        }

        self.storage.write_files(&files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::csv_output::decode_observations;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()).into()
            })
        }

        fn write_files(&self, files: &[(&str, &[u8])]) -> Result<Vec<PathBuf>> {
            let mut stored = self.files.borrow_mut();
            Ok(files
                .iter()
                .map(|(path, data)| {
                    stored.insert(path.to_string(), data.to_vec());
                    PathBuf::from(path)
                })
                .collect())
        }
    }

    fn pipeline(request: GenerationRequest) -> LpmPipeline<MockStorage, ChaCha8Rng> {
        LpmPipeline::new(MockStorage::default(), ChaCha8Rng::seed_from_u64(42), request)
    }

    #[test]
    fn test_fit_spans_the_with_extremes_range() {
        let mut p = pipeline(GenerationRequest::default());
        let datasets = p.generate().unwrap();
        let boundaries = p.fit(&datasets).unwrap();

        let (x_min, x_max) = boundaries.x_range;
        assert!(datasets.with_extremes.iter().all(|o| o.x >= x_min && o.x <= x_max));
        assert_eq!(boundaries.lines.len(), 2);
        assert_eq!(boundaries.lines[0].label, BOUNDARY_WITHOUT_EXTREMES);
        assert_eq!(boundaries.lines[1].label, BOUNDARY_WITH_EXTREMES);
        for line in &boundaries.lines {
            assert_eq!(line.start.0, x_min);
            assert_eq!(line.end.0, x_max);
        }
    }

    #[test]
    fn test_load_writes_csv_and_plot() {
        let mut p = pipeline(GenerationRequest::default());
        let datasets = p.generate().unwrap();
        let boundaries = p.fit(&datasets).unwrap();
        let written = p.load(&datasets, &boundaries).unwrap();

        assert_eq!(written, vec![PathBuf::from("dataset.csv"), PathBuf::from("dataPlot.pdf")]);
        let csv = p.storage().read_file("dataset.csv").unwrap();
        assert_eq!(decode_observations(&csv).unwrap().len(), datasets.with_extremes.len());
        let pdf = p.storage().read_file("dataPlot.pdf").unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_load_writes_svg_when_asked() {
        let request = GenerationRequest {
            save_data: false,
            plot_file: "dataPlot.svg".to_string(),
            ..GenerationRequest::default()
        };
        let mut p = pipeline(request);
        let datasets = p.generate().unwrap();
        let boundaries = p.fit(&datasets).unwrap();
        let written = p.load(&datasets, &boundaries).unwrap();

        assert_eq!(written, vec![PathBuf::from("dataPlot.svg")]);
        let svg = p.storage().read_file("dataPlot.svg").unwrap();
        assert!(String::from_utf8(svg).unwrap().contains("Classification of Binary Data by LPM"));
    }

    #[test]
    fn test_load_respects_save_flags() {
        let request = GenerationRequest {
            save_data: false,
            save_plot: false,
            ..GenerationRequest::default()
        };
        let mut p = pipeline(request);
        let datasets = p.generate().unwrap();
        let boundaries = p.fit(&datasets).unwrap();
        assert!(p.load(&datasets, &boundaries).unwrap().is_empty());
        assert!(p.storage().files.borrow().is_empty());
    }

    #[test]
    fn test_empty_run_is_invalid() {
        let request = GenerationRequest {
            normal_count: 0,
            extreme_count: 0,
            ..GenerationRequest::default()
        };
        let mut p = pipeline(request);
        let datasets = p.generate().unwrap();
        assert!(matches!(p.fit(&datasets), Err(LpmError::InvalidParameter { .. })));
    }

    #[test]
    fn test_degenerate_boundary_aborts_by_default() {
        // Two normal points cannot support three coefficients.
        let request = GenerationRequest {
            normal_count: 2,
            extreme_count: 2,
            ..GenerationRequest::default()
        };
        let mut p = pipeline(request);
        let datasets = p.generate().unwrap();
        assert!(matches!(p.fit(&datasets), Err(LpmError::DegenerateFit { .. })));
    }

    #[test]
    fn test_degenerate_boundary_can_be_omitted() {
        let request = GenerationRequest {
            normal_count: 2,
            extreme_count: 2,
            omit_degenerate_boundaries: true,
            ..GenerationRequest::default()
        };
        let mut p = pipeline(request);
        let datasets = p.generate().unwrap();
        let boundaries = p.fit(&datasets).unwrap();
        assert_eq!(boundaries.lines.len(), 1);
        assert_eq!(boundaries.lines[0].label, BOUNDARY_WITH_EXTREMES);
    }
}
