//! Configuration surface for the GM-PHD tracker.

use serde::{Deserialize, Serialize};

use crate::types::GaussianComponent;

/// Every tunable of the GM-PHD recursion, collected into one value.
///
/// The core never loads this from a file or the environment; a host
/// application constructs it however it likes and hands it to
/// [`crate::tracker::MultiTargetTracker::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Distance assigned to, and gate used for, the missed-detection hypothesis.
    pub missed_distance: f64,
    /// Bypass `missed_distance` gating entirely when `true`.
    pub include_all: bool,
    /// Lay hypotheses out by detection (`true`) or by component (`false`).
    pub order_by_detection: bool,
    /// PHD survival probability, applied to component weights before hypothesising.
    pub prob_survival: f64,
    /// Probability an existing target is detected at each step.
    pub prob_of_detection: f64,
    /// Expected clutter count per unit measurement-space volume.
    pub clutter_spatial_density: f64,
    /// Components with weight below this are dropped during reduction.
    pub prune_threshold: f64,
    /// Squared-Mahalanobis gate for merging components during reduction.
    pub merge_threshold: f64,
    /// Optional cap on the number of components retained after merge.
    pub max_components: Option<usize>,
    /// Minimum weight a newly-tagged component needs to spawn a track.
    pub extraction_threshold: f64,
    /// Template Gaussian injected (with a fresh timestamp) at the start of every step.
    pub birth_component: GaussianComponent,
    /// When set, fresh-tag minting is driven by a `ChaCha8Rng` seeded with this
    /// value instead of the system RNG, making a run byte-for-byte reproducible.
    pub rng_seed: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            missed_distance: f64::INFINITY,
            include_all: false,
            order_by_detection: false,
            prob_survival: 1.0,
            prob_of_detection: 0.9,
            clutter_spatial_density: 1e-10,
            prune_threshold: 1e-5,
            merge_threshold: 16.0,
            max_components: None,
            extraction_threshold: 0.0,
            birth_component: GaussianComponent::birth_template(
                nalgebra::DVector::zeros(1),
                nalgebra::DMatrix::identity(1, 1),
                0.01,
            ),
            rng_seed: None,
        }
    }
}
