//! Pairs one component against N detections, producing an N+1 hypothesis
//! group gated by a configured distance.

use crate::detection::{Detection, Measurement, MissedDetection};
use crate::error::TrackingError;
use crate::hypothesis::{Hypothesis, HypothesisGroup};
use crate::measure::Measure;
use crate::predictor::{MeasurementPrediction, Predictor, SingleTargetUpdater};
use crate::types::GaussianComponent;

/// Generates prediction-detection hypotheses scored by a [`Measure`], gated
/// at `missed_distance` unless `include_all` is set.
pub struct DistanceHypothesiser<'a, P, U, M> {
    pub predictor: &'a P,
    pub updater: &'a U,
    pub measure: &'a M,
    pub missed_distance: f64,
    pub include_all: bool,
}

impl<'a, P, U, M> DistanceHypothesiser<'a, P, U, M>
where
    P: Predictor,
    U: SingleTargetUpdater,
    M: Measure,
{
    pub fn new(predictor: &'a P, updater: &'a U, measure: &'a M, missed_distance: f64, include_all: bool) -> Self {
        Self {
            predictor,
            updater,
            measure,
            missed_distance,
            include_all,
        }
    }

    /// Evaluates every track-detection association hypothesis for one
    /// component, returning `|detections| + 1` hypotheses sorted worst-first.
    pub fn hypothesise(
        &self,
        component: &GaussianComponent,
        detections: &[Detection],
        timestamp: f64,
    ) -> Result<HypothesisGroup, TrackingError> {
        let mut hypotheses = Vec::with_capacity(detections.len() + 1);

        // Common prediction for the missed hypothesis; detections get their
        // own re-prediction below since they may arrive with their own timestamp.
        let prediction = self.predictor.predict(component, timestamp)?;
        let missed_measurement_prediction = MeasurementPrediction {
            mean: prediction.mean.clone(),
            covariance: prediction.covariance.clone(),
        };
        hypotheses.push(Hypothesis::new(
            prediction,
            missed_measurement_prediction,
            Measurement::Missed(MissedDetection::new(timestamp)),
            self.missed_distance,
        ));

        for detection in detections {
            if detection.timestamp < component.timestamp {
                tracing::warn!(
                    detection_timestamp = detection.timestamp,
                    component_timestamp = component.timestamp,
                    tag = %component.tag,
                    "detection timestamp precedes component timestamp"
                );
            }
            let prediction = self.predictor.predict(component, detection.timestamp)?;
            let measurement_prediction = self.updater.predict_measurement(&prediction, &detection.model)?;
            let distance = self.measure.distance(&measurement_prediction, detection)?;

            if self.include_all || distance < self.missed_distance {
                hypotheses.push(Hypothesis::new(
                    prediction,
                    measurement_prediction,
                    Measurement::Detection(detection.clone()),
                    distance,
                ));
            }
        }

        let mut group = HypothesisGroup::new(hypotheses);
        group.sort_descending();
        Ok(group)
    }
}
