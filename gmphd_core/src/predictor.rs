//! Plug-point traits the core consumes: state prediction and the
//! single-target Kalman collaborator. Callers may substitute their own;
//! [`crate::kalman`] ships a linear reference implementation of both.

use nalgebra::{DMatrix, DVector};

use crate::detection::MeasurementModel;
use crate::error::TrackingError;
use crate::hypothesis::Hypothesis;
use crate::types::GaussianComponent;

/// Predicted measurement distribution: `mean`/`covariance` in measurement space.
#[derive(Debug, Clone)]
pub struct MeasurementPrediction {
    pub mean: DVector<f64>,
    pub covariance: DMatrix<f64>,
}

/// The posterior a single-target Kalman update produces.
#[derive(Debug, Clone)]
pub struct KalmanPosterior {
    pub mean: DVector<f64>,
    pub covariance: DMatrix<f64>,
    pub timestamp: f64,
}

/// Advances a component's state distribution to a target timestamp.
pub trait Predictor {
    fn predict(&self, component: &GaussianComponent, timestamp: f64) -> Result<GaussianComponent, TrackingError>;
}

/// Performs the single-target half of a Kalman correction: projecting a
/// prediction into measurement space, and applying the gain once a real
/// measurement is available.
pub trait SingleTargetUpdater {
    fn predict_measurement(
        &self,
        prediction: &GaussianComponent,
        model: &MeasurementModel,
    ) -> Result<MeasurementPrediction, TrackingError>;

    fn update(&self, hypothesis: &Hypothesis) -> Result<KalmanPosterior, TrackingError>;
}
