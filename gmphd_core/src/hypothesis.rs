//! Single- and multi-hypothesis containers produced by the hypothesisers.

use std::cmp::Ordering;

use crate::detection::Measurement;
use crate::predictor::MeasurementPrediction;
use crate::types::GaussianComponent;

/// One component-measurement pairing: a predicted component, the measurement
/// it was scored against (real or missed), the measurement-space prediction
/// used to score it, and the resulting distance.
///
/// Ordered by `distance` so a group of hypotheses can be sorted worst-first,
/// matching the layout downstream code relies on (missed hypothesis at the
/// head when `missed_distance = +inf`).
#[derive(Debug, Clone)]
pub struct Hypothesis {
    pub prediction: GaussianComponent,
    pub measurement_prediction: MeasurementPrediction,
    pub measurement: Measurement,
    pub distance: f64,
}

impl Hypothesis {
    pub fn new(
        prediction: GaussianComponent,
        measurement_prediction: MeasurementPrediction,
        measurement: Measurement,
        distance: f64,
    ) -> Self {
        Self {
            prediction,
            measurement_prediction,
            measurement,
            distance,
        }
    }

    pub fn is_missed(&self) -> bool {
        self.measurement.is_missed()
    }
}

impl PartialEq for Hypothesis {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for Hypothesis {}

impl PartialOrd for Hypothesis {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hypothesis {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.partial_cmp(&other.distance).unwrap_or(Ordering::Equal)
    }
}

/// An ordered group of hypotheses sharing either a component index (by-component
/// layout) or a detection index (by-detection layout).
#[derive(Debug, Clone, Default)]
pub struct HypothesisGroup {
    pub hypotheses: Vec<Hypothesis>,
}

impl HypothesisGroup {
    pub fn new(hypotheses: Vec<Hypothesis>) -> Self {
        Self { hypotheses }
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Sorts in place, worst (largest distance) first.
    pub fn sort_descending(&mut self) {
        self.hypotheses.sort_by(|a, b| b.cmp(a));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hypothesis> {
        self.hypotheses.iter()
    }
}

impl IntoIterator for HypothesisGroup {
    type Item = Hypothesis;
    type IntoIter = std::vec::IntoIter<Hypothesis>;

    fn into_iter(self) -> Self::IntoIter {
        self.hypotheses.into_iter()
    }
}
