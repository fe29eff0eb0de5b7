//! Distance measures between a measurement prediction and a real detection.

use crate::detection::Detection;
use crate::error::TrackingError;
use crate::predictor::MeasurementPrediction;

/// Callable `(measurement_prediction, detection) -> non-negative real`.
pub trait Measure {
    fn distance(&self, prediction: &MeasurementPrediction, detection: &Detection) -> Result<f64, TrackingError>;
}

/// The canonical choice: squared Mahalanobis distance under the predicted
/// measurement covariance, via Cholesky rather than an explicit inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mahalanobis;

impl Measure for Mahalanobis {
    fn distance(&self, prediction: &MeasurementPrediction, detection: &Detection) -> Result<f64, TrackingError> {
        let innovation = &detection.state_vector - &prediction.mean;
        if innovation.len() != prediction.covariance.nrows() {
            return Err(TrackingError::shape_mismatch(
                innovation.len(),
                prediction.covariance.nrows(),
            ));
        }
        let chol = prediction
            .covariance
            .clone()
            .cholesky()
            .ok_or_else(|| TrackingError::non_pd_covariance(uuid::Uuid::nil()))?;
        let solved = chol.solve(&innovation);
        Ok(innovation.dot(&solved).max(0.0).sqrt())
    }
}
