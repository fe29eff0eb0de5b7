//! Numerically stable multivariate-normal density evaluation.
//!
//! Evaluated in log-space via Cholesky rather than a direct `pdf` product, so
//! that downstream per-detection normalisation can log-sum-exp instead of
//! risking an underflowed product of small densities.

use nalgebra::{DMatrix, DVector};
use std::f64::consts::PI;
use uuid::Uuid;

use crate::error::TrackingError;

/// `log N(x; mean, covariance)`. Fails loudly if `covariance` is not
/// positive-definite rather than silently degrading.
pub fn log_mvn_density(x: &DVector<f64>, mean: &DVector<f64>, covariance: &DMatrix<f64>) -> Result<f64, TrackingError> {
    if x.len() != mean.len() {
        return Err(TrackingError::shape_mismatch(x.len(), mean.len()));
    }
    let k = mean.len();
    let chol = covariance
        .clone()
        .cholesky()
        .ok_or_else(|| TrackingError::non_pd_covariance(Uuid::nil()))?;
    let l = chol.l();

    let diff = x - mean;
    let y = l
        .solve_lower_triangular(&diff)
        .ok_or_else(|| TrackingError::non_pd_covariance(Uuid::nil()))?;
    let mahalanobis_sq = y.norm_squared();

    let log_det = 2.0 * (0..k).map(|i| l[(i, i)].ln()).sum::<f64>();

    Ok(-0.5 * (k as f64 * (2.0 * PI).ln() + log_det + mahalanobis_sq))
}

/// `N(x; mean, covariance)`, exponentiating the stable log form.
pub fn mvn_density(x: &DVector<f64>, mean: &DVector<f64>, covariance: &DMatrix<f64>) -> Result<f64, TrackingError> {
    Ok(log_mvn_density(x, mean, covariance)?.exp())
}

/// Numerically stable `ln(sum(exp(values)))`.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|v| (v - max).exp()).sum::<f64>().ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn density_matches_standard_normal_at_mean() {
        let mean = DVector::from_vec(vec![0.0]);
        let cov = DMatrix::from_element(1, 1, 1.0);
        let density = mvn_density(&mean, &mean, &cov).unwrap();
        assert_relative_eq!(density, 1.0 / (2.0 * PI).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn log_sum_exp_matches_naive_sum_when_safe() {
        let values = [1.0_f64.ln(), 1.0_f64.ln(), 1.0_f64.ln()];
        assert_relative_eq!(log_sum_exp(&values).exp(), 3.0, epsilon = 1e-9);
    }
}
