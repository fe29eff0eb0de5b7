//! Error types for the GM-PHD tracker core.

use uuid::Uuid;

/// Errors that can occur while running the GM-PHD recursion.
///
/// All variants here are fatal: a step either completes cleanly or returns
/// one of these without mutating the mixture. Soft conditions (out-of-order
/// timestamps, weight-sum underflow) are logged through `tracing` instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TrackingError {
    #[error("shape mismatch: measurement has dimension {measurement_dim}, prediction has dimension {prediction_dim}")]
    ShapeMismatch {
        measurement_dim: usize,
        prediction_dim: usize,
    },

    #[error("covariance is not positive-definite (component tag {tag})")]
    NonPositiveDefiniteCovariance { tag: Uuid },

    #[error("non-finite weight {weight} produced for component tag {tag}")]
    NonFiniteWeight { tag: Uuid, weight: f64 },

    #[error("hypothesiser received hypothesis groups not laid out by-detection")]
    NotByDetectionLayout,
}

impl TrackingError {
    pub fn shape_mismatch(measurement_dim: usize, prediction_dim: usize) -> Self {
        Self::ShapeMismatch {
            measurement_dim,
            prediction_dim,
        }
    }

    pub fn non_pd_covariance(tag: Uuid) -> Self {
        Self::NonPositiveDefiniteCovariance { tag }
    }

    pub fn non_finite_weight(tag: Uuid, weight: f64) -> Self {
        Self::NonFiniteWeight { tag, weight }
    }
}
