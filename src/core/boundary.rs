use crate::core::{BoundaryLine, LinearFit, Observation, Result};
use crate::utils::error::LpmError;
use nalgebra::{DMatrix, DVector};

/// Singular values below this fraction of the largest one count as zero.
const RANK_TOLERANCE: f64 = 1e-10;

/// `weight_y` at or below this magnitude leaves the boundary undefined.
const WEIGHT_EPSILON: f64 = 1e-12;

/// Ordinary least squares of `value` on `x`, `y` and an intercept.
pub fn fit_linear_probability(data: &[Observation]) -> Result<LinearFit> {
    if data.len() < 3 {
        return Err(LpmError::degenerate_fit(format!(
            "need at least 3 observations to fit 3 coefficients, got {}",
            data.len()
        )));
    }

    let design = DMatrix::from_fn(data.len(), 3, |row, col| match col {
        0 => data[row].x,
        1 => data[row].y,
        _ => 1.0,
    });
    let target = DVector::from_iterator(data.len(), data.iter().map(|o| f64::from(o.value)));

    let svd = design.svd(true, true);
    let largest = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let tolerance = largest * RANK_TOLERANCE;
    let rank = svd.rank(tolerance);
    if rank < 3 {
        return Err(LpmError::degenerate_fit(format!(
            "design matrix has rank {} (collinear or constant predictors)",
            rank
        )));
    }

    let coefficients = svd
        .solve(&target, tolerance)
        .map_err(|e| LpmError::degenerate_fit(e.to_string()))?;

    let fit = LinearFit {
        weight_x: coefficients[0],
        weight_y: coefficients[1],
        bias: coefficients[2],
    };
    if !(fit.weight_x.is_finite() && fit.weight_y.is_finite() && fit.bias.is_finite()) {
        return Err(LpmError::degenerate_fit("least squares solution is not finite"));
    }

    tracing::debug!(
        "Fitted LPM over {} observations: weight_x={:.6}, weight_y={:.6}, bias={:.6}",
        data.len(),
        fit.weight_x,
        fit.weight_y,
        fit.bias
    );

    Ok(fit)
}

impl LinearFit {
    /// Fitted probability at `(x, y)`.
    pub fn predict(&self, x: f64, y: f64) -> f64 {
        self.weight_x * x + self.weight_y * y + self.bias
    }

    /// Slope and intercept of the line where the fitted probability is 0.5,
    /// written as `y = intercept + slope * x`.
    pub fn decision_line(&self) -> Result<(f64, f64)> {
        if !self.weight_y.is_finite() || self.weight_y.abs() <= WEIGHT_EPSILON {
            return Err(LpmError::degenerate_fit(format!(
                "weight on y is {}, the boundary is not a function of x",
                self.weight_y
            )));
        }
        let slope = -self.weight_x / self.weight_y;
        let intercept = (0.5 - self.bias) / self.weight_y;
        Ok((slope, intercept))
    }

    pub fn boundary(&self, x1: f64, x2: f64, label: &str) -> Result<BoundaryLine> {
        let (slope, intercept) = self.decision_line()?;
        Ok(BoundaryLine {
            start: (x1, intercept + slope * x1),
            end: (x2, intercept + slope * x2),
            label: label.to_string(),
        })
    }
}

pub fn boundary_line(data: &[Observation], x1: f64, x2: f64, label: &str) -> Result<BoundaryLine> {
    fit_linear_probability(data)?.boundary(x1, x2, label)
}

/// Smallest and largest `x` in `data`, or `None` when it is empty.
pub fn x_range(data: &[Observation]) -> Option<(f64, f64)> {
    data.iter().fold(None, |range, o| match range {
        None => Some((o.x, o.x)),
        Some((lo, hi)) => Some((lo.min(o.x), hi.max(o.x))),
    })
}
