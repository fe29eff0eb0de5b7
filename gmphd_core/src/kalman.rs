//! Reference linear-Kalman implementations of [`Predictor`] and
//! [`SingleTargetUpdater`], following the Cholesky-gated gain / Joseph-form
//! covariance update style used elsewhere in this codebase for numerical
//! robustness. Callers may substitute their own collaborators; this pair
//! exists so the crate is directly usable out of the box.

use nalgebra::DMatrix;

use crate::detection::MeasurementModel;
use crate::error::TrackingError;
use crate::hypothesis::Hypothesis;
use crate::predictor::{KalmanPosterior, MeasurementPrediction, Predictor, SingleTargetUpdater};
use crate::types::GaussianComponent;

/// `x' = F x`, `P' = F P F^T + Q`.
#[derive(Debug, Clone)]
pub struct LinearPredictor {
    pub transition: DMatrix<f64>,
    pub process_noise: DMatrix<f64>,
}

impl LinearPredictor {
    pub fn new(transition: DMatrix<f64>, process_noise: DMatrix<f64>) -> Self {
        Self {
            transition,
            process_noise,
        }
    }

    /// Static (no-motion) model: identity transition, additive process noise.
    /// Fits the spec's scalar-position test fixtures directly.
    pub fn identity(state_dim: usize, process_noise: DMatrix<f64>) -> Self {
        Self::new(DMatrix::identity(state_dim, state_dim), process_noise)
    }

    /// Constant-velocity model over a `[pos_1..pos_n, vel_1..vel_n]` stacked
    /// state, advanced by `dt`.
    pub fn constant_velocity(position_dims: usize, dt: f64, process_noise: DMatrix<f64>) -> Self {
        let state_dim = position_dims * 2;
        let mut transition = DMatrix::identity(state_dim, state_dim);
        for i in 0..position_dims {
            transition[(i, position_dims + i)] = dt;
        }
        Self::new(transition, process_noise)
    }
}

impl Predictor for LinearPredictor {
    fn predict(&self, component: &GaussianComponent, timestamp: f64) -> Result<GaussianComponent, TrackingError> {
        if component.mean.len() != self.transition.ncols() {
            return Err(TrackingError::shape_mismatch(component.mean.len(), self.transition.ncols()));
        }
        let mean = &self.transition * &component.mean;
        let covariance = &self.transition * &component.covariance * self.transition.transpose() + &self.process_noise;
        Ok(GaussianComponent::new(mean, covariance, component.weight, component.tag, timestamp))
    }
}

/// Standard Kalman measurement update with a Cholesky-gated gain and
/// Joseph-form covariance update (numerically stable, symmetric by
/// construction even under roundoff).
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearKalmanUpdater;

impl SingleTargetUpdater for LinearKalmanUpdater {
    fn predict_measurement(
        &self,
        prediction: &GaussianComponent,
        model: &MeasurementModel,
    ) -> Result<MeasurementPrediction, TrackingError> {
        if prediction.mean.len() != model.state_dim() {
            return Err(TrackingError::shape_mismatch(prediction.mean.len(), model.state_dim()));
        }
        Ok(MeasurementPrediction {
            mean: model.project(&prediction.mean),
            covariance: model.project_covariance(&prediction.covariance),
        })
    }

    fn update(&self, hypothesis: &Hypothesis) -> Result<KalmanPosterior, TrackingError> {
        let detection = hypothesis
            .measurement
            .as_detection()
            .expect("update() is only called on hypotheses carrying a real detection");
        let prediction = &hypothesis.prediction;
        let model = &detection.model;

        let innovation = &detection.state_vector - &hypothesis.measurement_prediction.mean;
        let innovation_cov = &hypothesis.measurement_prediction.covariance;

        let chol = innovation_cov
            .clone()
            .cholesky()
            .ok_or_else(|| TrackingError::non_pd_covariance(prediction.tag))?;

        let kalman_gain = &prediction.covariance * model.matrix.transpose() * chol.inverse();

        let mean = &prediction.mean + &kalman_gain * innovation;

        let state_dim = prediction.covariance.nrows();
        let identity = DMatrix::<f64>::identity(state_dim, state_dim);
        let i_kh = &identity - &kalman_gain * &model.matrix;
        let covariance =
            &i_kh * &prediction.covariance * i_kh.transpose() + &kalman_gain * &model.noise * kalman_gain.transpose();

        Ok(KalmanPosterior {
            mean,
            covariance,
            timestamp: detection.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use uuid::Uuid;

    #[test]
    fn identity_predictor_preserves_mean() {
        let predictor = LinearPredictor::identity(1, DMatrix::from_element(1, 1, 0.01));
        let component = GaussianComponent::new(
            DVector::from_vec(vec![0.3]),
            DMatrix::from_element(1, 1, 1.0),
            0.4,
            Uuid::new_v4(),
            0.0,
        );
        let predicted = predictor.predict(&component, 1.0).unwrap();
        assert_relative_eq!(predicted.mean[0], 0.3);
        assert_relative_eq!(predicted.covariance[(0, 0)], 1.01);
        assert_eq!(predicted.timestamp, 1.0);
    }
}
