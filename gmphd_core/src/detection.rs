//! Measurement types: real detections, the missed-detection sentinel, and
//! the linear measurement model a detection carries.

use nalgebra::{DMatrix, DVector};

/// Linear (or linearised) measurement model: `z = H x + noise`, `noise ~ N(0, R)`.
#[derive(Debug, Clone)]
pub struct MeasurementModel {
    pub matrix: DMatrix<f64>,
    pub noise: DMatrix<f64>,
}

impl MeasurementModel {
    pub fn new(matrix: DMatrix<f64>, noise: DMatrix<f64>) -> Self {
        Self { matrix, noise }
    }

    pub fn measurement_dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn state_dim(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn project(&self, mean: &DVector<f64>) -> DVector<f64> {
        &self.matrix * mean
    }

    pub fn project_covariance(&self, covariance: &DMatrix<f64>) -> DMatrix<f64> {
        &self.matrix * covariance * self.matrix.transpose() + &self.noise
    }
}

/// A real measurement: a state-space vector observed at a timestamp under a
/// given measurement model. Clutter detections are indistinguishable from
/// real ones at this type.
#[derive(Debug, Clone)]
pub struct Detection {
    pub state_vector: DVector<f64>,
    pub timestamp: f64,
    pub model: MeasurementModel,
}

impl Detection {
    pub fn new(state_vector: DVector<f64>, timestamp: f64, model: MeasurementModel) -> Self {
        Self {
            state_vector,
            timestamp,
            model,
        }
    }
}

/// The missed-detection pseudo-measurement: carries only a timestamp.
#[derive(Debug, Clone, Copy)]
pub struct MissedDetection {
    pub timestamp: f64,
}

impl MissedDetection {
    pub fn new(timestamp: f64) -> Self {
        Self { timestamp }
    }
}

/// Either a real detection or the missed-detection sentinel.
#[derive(Debug, Clone)]
pub enum Measurement {
    Detection(Detection),
    Missed(MissedDetection),
}

impl Measurement {
    pub fn timestamp(&self) -> f64 {
        match self {
            Measurement::Detection(d) => d.timestamp,
            Measurement::Missed(m) => m.timestamp,
        }
    }

    pub fn is_missed(&self) -> bool {
        matches!(self, Measurement::Missed(_))
    }

    pub fn as_detection(&self) -> Option<&Detection> {
        match self {
            Measurement::Detection(d) => Some(d),
            Measurement::Missed(_) => None,
        }
    }
}
