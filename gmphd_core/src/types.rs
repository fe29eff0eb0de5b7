//! Tagged Gaussian components and the mixture that holds them.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single Gaussian in the mixture.
///
/// `tag` is a stable identity shared across a component's lifetime and its
/// associated track. `Uuid::nil()` is the reserved sentinel for the birth
/// template; every other value is a fresh, never-reused identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianComponent {
    pub mean: DVector<f64>,
    pub covariance: DMatrix<f64>,
    pub weight: f64,
    pub tag: Uuid,
    pub timestamp: f64,
}

impl GaussianComponent {
    pub fn new(mean: DVector<f64>, covariance: DMatrix<f64>, weight: f64, tag: Uuid, timestamp: f64) -> Self {
        Self {
            mean,
            covariance,
            weight,
            tag,
            timestamp,
        }
    }

    /// Builds a birth template: tag `Uuid::nil()`, stamped at `timestamp = 0.0`
    /// until the tracker restamps it at the start of a step.
    pub fn birth_template(mean: DVector<f64>, covariance: DMatrix<f64>, weight: f64) -> Self {
        Self::new(mean, covariance, weight, Uuid::nil(), 0.0)
    }

    pub fn is_birth(&self) -> bool {
        self.tag.is_nil()
    }

    /// Returns a copy of this component re-stamped at `timestamp`, used to
    /// inject a fresh birth component into the mixture at the start of a step.
    pub fn restamped(&self, timestamp: f64) -> Self {
        let mut c = self.clone();
        c.timestamp = timestamp;
        c
    }
}

/// Ordered, appendable container of components.
///
/// Invariants maintained by callers (not enforced by this type, which is a
/// thin value-semantics wrapper): all weights non-negative, all timestamps
/// equal after a predict step, the nil tag appears at most once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GaussianMixture {
    pub components: Vec<GaussianComponent>,
}

impl GaussianMixture {
    pub fn new(components: Vec<GaussianComponent>) -> Self {
        Self { components }
    }

    pub fn push(&mut self, component: GaussianComponent) {
        self.components.push(component);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.components.iter().map(|c| c.weight).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GaussianComponent> {
        self.components.iter()
    }
}

impl IntoIterator for GaussianMixture {
    type Item = GaussianComponent;
    type IntoIter = std::vec::IntoIter<GaussianComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl From<Vec<GaussianComponent>> for GaussianMixture {
    fn from(components: Vec<GaussianComponent>) -> Self {
        Self { components }
    }
}
