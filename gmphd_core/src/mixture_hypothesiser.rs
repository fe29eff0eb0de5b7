//! Applies a [`DistanceHypothesiser`] to every component in a mixture and,
//! optionally, transposes the resulting by-component hypothesis matrix into
//! by-detection layout.

use crate::detection::Detection;
use crate::distance_hypothesiser::DistanceHypothesiser;
use crate::error::TrackingError;
use crate::hypothesis::HypothesisGroup;
use crate::measure::Measure;
use crate::predictor::{Predictor, SingleTargetUpdater};
use crate::types::GaussianComponent;

pub struct GaussianMixtureHypothesiser<'a, P, U, M> {
    pub predictor: &'a P,
    pub updater: &'a U,
    pub measure: &'a M,
    pub missed_distance: f64,
    pub include_all: bool,
    pub order_by_detection: bool,
    /// PHD survival probability applied to every component's weight before
    /// hypothesis generation.
    pub prob_survival: f64,
}

impl<'a, P, U, M> GaussianMixtureHypothesiser<'a, P, U, M>
where
    P: Predictor,
    U: SingleTargetUpdater,
    M: Measure,
{
    /// Builds hypothesis groups for every component against every detection.
    ///
    /// `order_by_detection = false` returns one by-component group per
    /// component (components producing zero hypotheses are skipped).
    /// `order_by_detection = true` returns one group per detection followed
    /// by a single trailing group holding every missed hypothesis.
    pub fn hypothesise(
        &self,
        components: &[GaussianComponent],
        detections: &[Detection],
        timestamp: f64,
    ) -> Result<Vec<HypothesisGroup>, TrackingError> {
        let hypothesiser = DistanceHypothesiser::new(
            self.predictor,
            self.updater,
            self.measure,
            self.missed_distance,
            self.include_all,
        );

        let mut by_component = Vec::with_capacity(components.len());
        for component in components {
            let thinned = if self.prob_survival < 1.0 {
                let mut c = component.clone();
                c.weight *= self.prob_survival;
                c
            } else {
                component.clone()
            };
            let group = hypothesiser.hypothesise(&thinned, detections, timestamp)?;
            if !group.is_empty() {
                by_component.push(group);
            }
        }

        if !self.order_by_detection {
            return Ok(by_component);
        }

        let mut by_detection: Vec<Vec<_>> = (0..detections.len()).map(|_| Vec::new()).collect();
        let mut missed = Vec::new();

        for group in by_component {
            for hyp in group.into_iter() {
                match hyp.is_missed() {
                    true => missed.push(hyp),
                    false => {
                        let detection = hyp.measurement.as_detection().expect("non-missed hypothesis carries a detection");
                        let idx = detections
                            .iter()
                            .position(|d| d.timestamp == detection.timestamp && d.state_vector == detection.state_vector)
                            .expect("hypothesis measurement must originate from the supplied detections");
                        by_detection[idx].push(hyp);
                    }
                }
            }
        }

        let mut result: Vec<HypothesisGroup> = by_detection.into_iter().map(HypothesisGroup::new).collect();
        result.push(HypothesisGroup::new(missed));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::MeasurementModel;
    use crate::kalman::{LinearKalmanUpdater, LinearPredictor};
    use crate::measure::Mahalanobis;
    use nalgebra::{DMatrix, DVector};
    use uuid::Uuid;

    fn identity_model() -> MeasurementModel {
        MeasurementModel::new(DMatrix::identity(1, 1), DMatrix::zeros(1, 1))
    }

    fn detection(value: f64) -> Detection {
        Detection::new(DVector::from_vec(vec![value]), 1.0, identity_model())
    }

    fn component(mean: f64, covariance: f64, weight: f64) -> GaussianComponent {
        GaussianComponent::new(
            DVector::from_vec(vec![mean]),
            DMatrix::from_element(1, 1, covariance),
            weight,
            Uuid::new_v4(),
            0.0,
        )
    }

    fn fixture() -> (Vec<GaussianComponent>, Vec<Detection>) {
        (
            vec![component(0.3, 1.0, 0.4), component(5.0, 0.5, 0.3)],
            vec![detection(1.0), detection(6.2)],
        )
    }

    #[test]
    fn ordered_by_detection_groups_one_hypothesis_per_component_per_detection() {
        let (components, detections) = fixture();
        let predictor = LinearPredictor::identity(1, DMatrix::zeros(1, 1));
        let updater = LinearKalmanUpdater;
        let measure = Mahalanobis;
        let hypothesiser = GaussianMixtureHypothesiser {
            predictor: &predictor,
            updater: &updater,
            measure: &measure,
            missed_distance: 20.0,
            include_all: false,
            order_by_detection: true,
            prob_survival: 1.0,
        };

        let groups = hypothesiser.hypothesise(&components, &detections, 1.0).unwrap();

        // Two detection groups plus one trailing missed group.
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 2);
        assert_eq!(groups[2].len(), 2);
        assert!(groups[0].iter().all(|h| h.distance >= 0.0));
        assert!(groups[0].iter().next().unwrap().distance < 10.0);
        assert!(groups[1].iter().last().unwrap().distance < 10.0);
        assert!(groups[2].iter().all(|h| h.is_missed()));
    }

    #[test]
    fn ordered_by_component_groups_three_hypotheses_per_component() {
        let (components, detections) = fixture();
        let predictor = LinearPredictor::identity(1, DMatrix::zeros(1, 1));
        let updater = LinearKalmanUpdater;
        let measure = Mahalanobis;
        let hypothesiser = GaussianMixtureHypothesiser {
            predictor: &predictor,
            updater: &updater,
            measure: &measure,
            missed_distance: 20.0,
            include_all: false,
            order_by_detection: false,
            prob_survival: 1.0,
        };

        let groups = hypothesiser.hypothesise(&components, &detections, 1.0).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1].len(), 3);
        // Sorted descending by distance: the missed hypothesis (distance = 20) leads.
        assert!(groups[0].iter().next().unwrap().is_missed());
        assert!(groups[1].iter().next().unwrap().is_missed());
    }
}
