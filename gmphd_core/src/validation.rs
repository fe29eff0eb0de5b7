//! Validation - Ground Truth Comparison
//! =====================================
//!
//! Scores externally-supplied track output against externally-supplied
//! ground truth. This module performs no simulation of its own: it only
//! records `(track id, position)` pairs a caller already has and reports
//! position RMS error and track fragmentation.
//!
//! ```ignore
//! use gmphd_core::validation::ValidationSession;
//!
//! let mut session = ValidationSession::new();
//! session.record_ground_truth(0, position_at_t);
//! session.record_track(0, track_id, &estimated_position_at_t);
//! let rms = session.overall_rms_error();
//! ```

use std::collections::{HashMap, HashSet};

use nalgebra::DVector;
use uuid::Uuid;

/// Per-target accuracy accumulator.
#[derive(Debug, Clone, Default)]
pub struct TargetMetrics {
    pub sample_count: usize,
    pub error_sum_squared: f64,
    pub max_error: f64,
    /// Every track id that has ever been assigned to this ground-truth target.
    pub assigned_track_ids: HashSet<Uuid>,
}

impl TargetMetrics {
    pub fn rms_error(&self) -> f64 {
        if self.sample_count == 0 {
            0.0
        } else {
            (self.error_sum_squared / self.sample_count as f64).sqrt()
        }
    }

    /// A target is fragmented when more than one track id has been assigned
    /// to it over the run (the tracker lost and re-spawned it).
    pub fn fragmentation_count(&self) -> usize {
        self.assigned_track_ids.len().saturating_sub(1)
    }
}

/// Accumulates ground truth and track positions over a run and scores them.
#[derive(Debug, Default)]
pub struct ValidationSession {
    ground_truth: HashMap<u32, Vec<DVector<f64>>>,
    metrics: HashMap<u32, TargetMetrics>,
}

impl ValidationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_ground_truth(&mut self, target_id: u32, position: DVector<f64>) {
        self.ground_truth.entry(target_id).or_default().push(position);
    }

    /// Scores an estimated position for `target_id` against the latest
    /// recorded ground truth for that target.
    pub fn record_track(&mut self, target_id: u32, track_id: Uuid, position: &DVector<f64>) {
        let Some(truth) = self.ground_truth.get(&target_id).and_then(|v| v.last()) else {
            return;
        };
        let error = (position - truth).norm();
        let metrics = self.metrics.entry(target_id).or_default();
        metrics.sample_count += 1;
        metrics.error_sum_squared += error * error;
        metrics.max_error = metrics.max_error.max(error);
        metrics.assigned_track_ids.insert(track_id);
    }

    pub fn metrics(&self) -> &HashMap<u32, TargetMetrics> {
        &self.metrics
    }

    /// Overall position RMS error across every scored target.
    pub fn overall_rms_error(&self) -> f64 {
        let total_sq: f64 = self.metrics.values().map(|m| m.error_sum_squared).sum();
        let total_count: usize = self.metrics.values().map(|m| m.sample_count).sum();
        if total_count == 0 {
            0.0
        } else {
            (total_sq / total_count as f64).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_a_perfectly_matched_target_with_zero_error() {
        let mut session = ValidationSession::new();
        let pos = DVector::from_vec(vec![1.0, 2.0]);
        session.record_ground_truth(0, pos.clone());
        session.record_track(0, Uuid::new_v4(), &pos);
        assert_eq!(session.overall_rms_error(), 0.0);
    }

    #[test]
    fn counts_fragmentation_when_track_id_changes() {
        let mut session = ValidationSession::new();
        let pos = DVector::from_vec(vec![0.0]);
        session.record_ground_truth(0, pos.clone());
        session.record_track(0, Uuid::new_v4(), &pos);
        session.record_track(0, Uuid::new_v4(), &pos);
        assert_eq!(session.metrics()[&0].fragmentation_count(), 1);
    }
}
