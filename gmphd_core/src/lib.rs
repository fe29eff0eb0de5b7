//! GM-PHD Core - Gaussian-Mixture Probability Hypothesis Density tracker
//!
//! Maintains an intensity function over an unknown, time-varying set of
//! targets as a weighted sum of Gaussian components, updates it against
//! noisy measurements drawn from an unknown mixture of target detections,
//! missed detections, and clutter, and extracts individual target tracks
//! from the surviving components.
//!
//! The recursion is split across three collaborating stages:
//! 1. [`mixture_hypothesiser`] pairs every component with every measurement.
//! 2. [`updater`] applies the per-hypothesis Kalman correction and the
//!    PHD-sense normalisation against clutter.
//! 3. [`tracker`] orchestrates predict → birth → hypothesise → update →
//!    reduce → track lifecycle, one step at a time.
//!
//! Low-level linear algebra, single-target Kalman math, and detection
//! simulation are plug-points ([`predictor`], [`measure`]) rather than part
//! of this crate's concern; [`kalman`] ships a linear reference
//! implementation so the crate is directly usable.

pub mod config;
pub mod density;
pub mod detection;
pub mod distance_hypothesiser;
pub mod error;
pub mod hypothesis;
pub mod kalman;
pub mod measure;
pub mod mixture_hypothesiser;
pub mod predictor;
pub mod reducer;
pub mod tracker;
pub mod types;
pub mod updater;

#[cfg(feature = "validation")]
pub mod validation;

pub use config::TrackerConfig;
pub use detection::{Detection, Measurement, MeasurementModel, MissedDetection};
pub use error::TrackingError;
pub use hypothesis::{Hypothesis, HypothesisGroup};
pub use kalman::{LinearKalmanUpdater, LinearPredictor};
pub use measure::{Mahalanobis, Measure};
pub use predictor::{KalmanPosterior, MeasurementPrediction, Predictor, SingleTargetUpdater};
pub use tracker::{DetectionSource, MultiTargetTracker, StepResult, Track, VecDetectionSource};
pub use types::{GaussianComponent, GaussianMixture};
