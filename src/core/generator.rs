use crate::core::{Observation, Result, SubsetParams};
use crate::utils::validation::Validate;
use nalgebra::{Matrix2, Vector2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Lower-triangular `L` with `L * L^T` equal to the subset covariance.
///
/// Closed form for the 2x2 case, so it stays defined on the semi-definite
/// boundary (|rho| = 1 or a zero standard deviation) where a numeric
/// Cholesky would refuse the matrix.
pub fn covariance_factor(sd_x: f64, sd_y: f64, rho: f64) -> Matrix2<f64> {
    let residual = (1.0 - rho * rho).max(0.0).sqrt();
    Matrix2::new(sd_x, 0.0, rho * sd_y, residual * sd_y)
}

/// Draws `params.count` observations from the bivariate normal described by
/// `params`, consuming two standard normal draws per observation.
pub fn generate_subset<R: Rng + ?Sized>(
    rng: &mut R,
    params: &SubsetParams,
) -> Result<Vec<Observation>> {
    params.validate()?;

    let mean = Vector2::new(params.mean_x, params.mean_y);
    let factor = covariance_factor(params.sd_x, params.sd_y, params.rho);

    tracing::debug!(
        "Generating {} observations for '{}' (value {}) around ({}, {})",
        params.count,
        params.group,
        params.value,
        params.mean_x,
        params.mean_y
    );

    let observations = (0..params.count)
        .map(|_| {
            let z1: f64 = StandardNormal.sample(rng);
            let z2: f64 = StandardNormal.sample(rng);
            let z = Vector2::new(z1, z2);
            let point = mean + factor * z;
            Observation {
                x: point.x,
                y: point.y,
                value: params.value,
                group: params.group.clone(),
            }
        })
        .collect();

    Ok(observations)
}
