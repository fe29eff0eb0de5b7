//! Orchestrates predict → birth → hypothesise → update → reduce → track
//! lifecycle for one time step, and owns the track table across steps.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::config::TrackerConfig;
use crate::detection::Detection;
use crate::error::TrackingError;
use crate::measure::Measure;
use crate::mixture_hypothesiser::GaussianMixtureHypothesiser;
use crate::predictor::{Predictor, SingleTargetUpdater};
use crate::reducer;
use crate::types::{GaussianComponent, GaussianMixture};
use crate::updater::GmPhdUpdater;

/// A single target's state history, keyed by the stable tag of the
/// components that compose it. Mutated only by [`MultiTargetTracker::step`].
#[derive(Debug, Clone)]
pub struct Track {
    pub id: Uuid,
    pub history: Vec<GaussianComponent>,
    pub active: bool,
}

impl Track {
    fn new(id: Uuid, first: GaussianComponent) -> Self {
        Self {
            id,
            history: vec![first],
            active: true,
        }
    }

    fn extend(&mut self, component: GaussianComponent) {
        self.history.push(component);
    }

    pub fn latest(&self) -> &GaussianComponent {
        self.history.last().expect("a track always has at least one state")
    }
}

/// Pull-style source of `(timestamp, detections)` batches, consumed in order.
pub trait DetectionSource {
    fn next_batch(&mut self) -> Option<(f64, Vec<Detection>)>;
}

/// An in-memory, `Vec`-backed [`DetectionSource`] for tests and the demo binary.
pub struct VecDetectionSource {
    batches: std::vec::IntoIter<(f64, Vec<Detection>)>,
}

impl VecDetectionSource {
    pub fn new(batches: Vec<(f64, Vec<Detection>)>) -> Self {
        Self {
            batches: batches.into_iter(),
        }
    }
}

impl DetectionSource for VecDetectionSource {
    fn next_batch(&mut self) -> Option<(f64, Vec<Detection>)> {
        self.batches.next()
    }
}

/// Outcome of one [`MultiTargetTracker::step`] call.
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    pub time: f64,
    pub expected_target_count: f64,
}

/// Maintains the GM-PHD intensity as a mixture of tagged components and
/// derives tracks from it. Single-threaded, cooperative: each `step` call is
/// atomic from the caller's perspective.
pub struct MultiTargetTracker<'a, P, U, M> {
    predictor: &'a P,
    updater: &'a U,
    measure: &'a M,
    config: TrackerConfig,
    gm_updater: GmPhdUpdater<'a, U>,
    mixture: GaussianMixture,
    tracks: HashMap<Uuid, Track>,
}

impl<'a, P, U, M> MultiTargetTracker<'a, P, U, M>
where
    P: Predictor,
    U: SingleTargetUpdater,
    M: Measure,
{
    pub fn new(predictor: &'a P, updater: &'a U, measure: &'a M, config: TrackerConfig) -> Self {
        let gm_updater = GmPhdUpdater::new(
            updater,
            config.prob_of_detection,
            config.clutter_spatial_density,
            config.rng_seed,
        );
        Self {
            predictor,
            updater,
            measure,
            config,
            gm_updater,
            mixture: GaussianMixture::default(),
            tracks: HashMap::new(),
        }
    }

    pub fn mixture(&self) -> &[GaussianComponent] {
        &self.mixture.components
    }

    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values().filter(|t| t.active)
    }

    pub fn track(&self, id: &Uuid) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Runs one full predict → birth → hypothesise → update → reduce → track
    /// maintenance cycle for the detections observed at `time`.
    pub fn step(&mut self, time: f64, detections: &[Detection]) -> Result<StepResult, TrackingError> {
        self.mixture.push(self.config.birth_component.restamped(time));
        tracing::debug!(time, "birth component injected");

        let hypothesiser = GaussianMixtureHypothesiser {
            predictor: self.predictor,
            updater: self.updater,
            measure: self.measure,
            missed_distance: self.config.missed_distance,
            include_all: self.config.include_all,
            order_by_detection: true,
            prob_survival: self.config.prob_survival,
        };
        let groups = hypothesiser.hypothesise(&self.mixture.components, detections, time)?;

        let updated = self.gm_updater.update(&groups)?;
        tracing::debug!(count = updated.len(), "updater produced components");

        let reduced = reducer::reduce(
            updated,
            self.config.prune_threshold,
            self.config.merge_threshold,
            self.config.max_components,
        )?;
        tracing::debug!(count = reduced.len(), "mixture reduced");
        self.mixture = GaussianMixture::from(reduced);

        self.maintain_tracks();

        let expected_target_count = self.mixture.total_weight();
        Ok(StepResult { time, expected_target_count })
    }

    fn maintain_tracks(&mut self) {
        let current_tags: HashSet<Uuid> = self.mixture.iter().map(|c| c.tag).filter(|t| !t.is_nil()).collect();

        for component in self.mixture.iter() {
            if component.tag.is_nil() {
                continue;
            }
            if let Some(track) = self.tracks.get_mut(&component.tag) {
                track.extend(component.clone());
            } else if component.weight > self.config.extraction_threshold {
                tracing::info!(tag = %component.tag, weight = component.weight, "track spawned");
                self.tracks.insert(component.tag, Track::new(component.tag, component.clone()));
            }
        }

        for track in self.tracks.values_mut() {
            if track.active && !current_tags.contains(&track.id) {
                tracing::info!(tag = %track.id, "track ended");
                track.active = false;
            }
        }
    }
}
