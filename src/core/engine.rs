use crate::core::pipeline::LpmPipeline;
use crate::core::{GenerationRequest, Pipeline, RunReport, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used by the default run.
pub const DEFAULT_SEED: u64 = 42;

pub struct GenerationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GenerationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&mut self) -> Result<RunReport> {
        tracing::info!("Starting LPM data generation...");

        // Generate
        let datasets = self.pipeline.generate()?;
        tracing::info!(
            "Generated {} observations ({} without extremes)",
            datasets.with_extremes.len(),
            datasets.without_extremes.len()
        );

        // Fit
        let boundaries = self.pipeline.fit(&datasets)?;
        for line in &boundaries.lines {
            tracing::info!(
                "{}: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
                line.label,
                line.start.0,
                line.start.1,
                line.end.0,
                line.end.1
            );
        }

        // Load
        let written = self.pipeline.load(&datasets, &boundaries)?;
        for path in &written {
            tracing::info!("Output saved to: {}", path.display());
        }

        Ok(RunReport {
            rows_without_extremes: datasets.without_extremes.len(),
            rows_with_extremes: datasets.with_extremes.len(),
            x_range: boundaries.x_range,
            boundaries: boundaries.lines,
            written,
        })
    }
}

/// Runs a full generation with a freshly seeded generator.
pub fn generate_lpm_data<S: Storage>(
    storage: S,
    seed: u64,
    request: GenerationRequest,
) -> Result<RunReport> {
    request.validate()?;
    tracing::debug!("Seeding ChaCha8 generator with {}", seed);
    let pipeline = LpmPipeline::new(storage, ChaCha8Rng::seed_from_u64(seed), request);
    GenerationEngine::new(pipeline).run()
}

/// 60 normal and 2 extreme observations labeled "Group 1"/"Group 2", with
/// both output files written.
pub fn generate_default<S: Storage>(storage: S) -> Result<RunReport> {
    generate_lpm_data(storage, DEFAULT_SEED, GenerationRequest::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Boundaries, BoundaryLine, Datasets, Observation};
    use crate::utils::error::LpmError;
    use std::cell::Cell;
    use std::path::PathBuf;

    struct FixedPipeline {
        fail_fit: bool,
        loaded: Cell<bool>,
    }

    impl FixedPipeline {
        fn new(fail_fit: bool) -> Self {
            Self {
                fail_fit,
                loaded: Cell::new(false),
            }
        }
    }

    impl Pipeline for FixedPipeline {
        fn generate(&mut self) -> Result<Datasets> {
            let point = Observation {
                x: 1.0,
                y: 2.0,
                value: 0,
                group: "A".to_string(),
            };
            Ok(Datasets {
                without_extremes: vec![point.clone()],
                with_extremes: vec![point.clone(), point],
            })
        }

        fn fit(&self, _datasets: &Datasets) -> Result<Boundaries> {
            if self.fail_fit {
                return Err(LpmError::degenerate_fit("singular"));
            }
            Ok(Boundaries {
                x_range: (1.0, 1.0),
                lines: vec![BoundaryLine {
                    start: (1.0, 0.0),
                    end: (1.0, 1.0),
                    label: "b".to_string(),
                }],
            })
        }

        fn load(&self, _datasets: &Datasets, _boundaries: &Boundaries) -> Result<Vec<PathBuf>> {
            self.loaded.set(true);
            Ok(vec![PathBuf::from("out.csv")])
        }
    }

    #[test]
    fn test_run_builds_report() {
        let mut engine = GenerationEngine::new(FixedPipeline::new(false));
        let report = engine.run().unwrap();
        assert_eq!(report.rows_without_extremes, 1);
        assert_eq!(report.rows_with_extremes, 2);
        assert_eq!(report.boundaries.len(), 1);
        assert_eq!(report.written, vec![PathBuf::from("out.csv")]);
        assert!(engine.pipeline().loaded.get());
    }

    #[test]
    fn test_fit_failure_stops_before_load() {
        let mut engine = GenerationEngine::new(FixedPipeline::new(true));
        assert!(matches!(engine.run(), Err(LpmError::DegenerateFit { .. })));
        assert!(!engine.pipeline().loaded.get());
    }
}
