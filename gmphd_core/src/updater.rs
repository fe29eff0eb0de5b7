//! The GM-PHD update step: per-hypothesis Kalman correction plus PHD-sense
//! per-detection normalisation against clutter.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

use crate::density::{log_mvn_density, log_sum_exp};
use crate::error::TrackingError;
use crate::hypothesis::HypothesisGroup;
use crate::predictor::SingleTargetUpdater;
use crate::types::GaussianComponent;

/// Consumes hypothesis groups laid out by-detection (one group per detection,
/// plus a trailing group of every missed hypothesis) and produces the
/// posterior mixture.
pub struct GmPhdUpdater<'a, U> {
    updater: &'a U,
    prob_of_detection: f64,
    clutter_spatial_density: f64,
    rng: Option<ChaCha8Rng>,
}

impl<'a, U> GmPhdUpdater<'a, U>
where
    U: SingleTargetUpdater,
{
    pub fn new(updater: &'a U, prob_of_detection: f64, clutter_spatial_density: f64, rng_seed: Option<u64>) -> Self {
        Self {
            updater,
            prob_of_detection,
            clutter_spatial_density,
            rng: rng_seed.map(ChaCha8Rng::seed_from_u64),
        }
    }

    fn mint_tag(&mut self) -> Uuid {
        match &mut self.rng {
            Some(rng) => {
                let mut bytes = [0u8; 16];
                rng.fill_bytes(&mut bytes);
                Builder::from_random_bytes(bytes).into_uuid()
            }
            None => Uuid::new_v4(),
        }
    }

    /// Runs the full update. `groups` must be the by-detection layout: `groups[..M]`
    /// one per detection, `groups[M]` the trailing missed group.
    pub fn update(&mut self, groups: &[HypothesisGroup]) -> Result<Vec<GaussianComponent>, TrackingError> {
        if groups.is_empty() {
            return Err(TrackingError::NotByDetectionLayout);
        }
        let (missed_group, detection_groups) = groups.split_last().expect("checked non-empty above");

        let mut updated = Vec::new();

        for group in detection_groups {
            let mut log_weights = Vec::with_capacity(group.len());
            let mut posteriors = Vec::with_capacity(group.len());

            for h in group.iter() {
                let detection = h
                    .measurement
                    .as_detection()
                    .expect("by-detection groups other than the trailing one carry only real detections");

                let log_q = log_mvn_density(
                    &detection.state_vector,
                    &h.measurement_prediction.mean,
                    &h.measurement_prediction.covariance,
                )?;
                let log_weight = self.prob_of_detection.ln() + h.prediction.weight.ln() + log_q;
                log_weights.push(log_weight);

                let posterior = self.updater.update(h)?;
                let tag = if h.prediction.is_birth() { self.mint_tag() } else { h.prediction.tag };
                posteriors.push((posterior, tag));
            }

            // Normalise in log-space: sum clutter density alongside every
            // per-hypothesis weight via log-sum-exp, so a run of tiny
            // densities never underflows to zero before it's combined.
            let log_clutter = self.clutter_spatial_density.ln();
            let mut combined = log_weights.clone();
            combined.push(log_clutter);
            let mut log_weight_sum = log_sum_exp(&combined);

            if !log_weight_sum.is_finite() {
                tracing::warn!(
                    "weight_sum underflowed to {}, falling back to clutter density",
                    log_weight_sum.exp()
                );
                log_weight_sum = log_clutter;
            }

            for ((posterior, tag), log_weight) in posteriors.into_iter().zip(log_weights.into_iter()) {
                let weight = (log_weight - log_weight_sum).exp();
                if !weight.is_finite() || weight < 0.0 {
                    return Err(TrackingError::non_finite_weight(tag, weight));
                }
                updated.push(GaussianComponent::new(posterior.mean, posterior.covariance, weight, tag, posterior.timestamp));
            }
        }

        for h in missed_group.iter() {
            if h.prediction.is_birth() {
                continue;
            }
            let weight = h.prediction.weight * (1.0 - self.prob_of_detection);
            if !weight.is_finite() || weight < 0.0 {
                return Err(TrackingError::non_finite_weight(h.prediction.tag, weight));
            }
            updated.push(GaussianComponent::new(
                h.prediction.mean.clone(),
                h.prediction.covariance.clone(),
                weight,
                h.prediction.tag,
                h.prediction.timestamp,
            ));
        }

        Ok(updated)
    }
}
