//! Mixture reduction: prune by weight, merge by Mahalanobis-gated moment
//! matching, optionally cap the component count.

use nalgebra::{DMatrix, DVector};

use crate::error::TrackingError;
use crate::types::GaussianComponent;

fn squared_mahalanobis(diff: &DVector<f64>, covariance: &DMatrix<f64>) -> Result<f64, TrackingError> {
    let chol = covariance
        .clone()
        .cholesky()
        .ok_or_else(|| TrackingError::non_pd_covariance(uuid::Uuid::nil()))?;
    let solved = chol.solve(diff);
    Ok(diff.dot(&solved).max(0.0))
}

fn prune(components: Vec<GaussianComponent>, prune_threshold: f64) -> Vec<GaussianComponent> {
    components.into_iter().filter(|c| c.weight >= prune_threshold).collect()
}

/// Moment-matching merge of every component gated within `merge_threshold`
/// squared Mahalanobis distance of the current highest-weight survivor.
/// Preserves the cluster's first and second moment; the merged component
/// inherits the tag of its highest-weight contributor.
fn merge(mut components: Vec<GaussianComponent>, merge_threshold: f64) -> Result<Vec<GaussianComponent>, TrackingError> {
    let mut merged = Vec::new();

    while !components.is_empty() {
        let (best_idx, _) = components
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal))
            .expect("components is non-empty");
        let best = components.remove(best_idx);

        let mut cluster = vec![best.clone()];
        let mut remaining = Vec::with_capacity(components.len());
        for candidate in components.into_iter() {
            let diff = &candidate.mean - &best.mean;
            let distance_sq = squared_mahalanobis(&diff, &best.covariance)?;
            if distance_sq < merge_threshold {
                cluster.push(candidate);
            } else {
                remaining.push(candidate);
            }
        }
        components = remaining;

        if cluster.len() == 1 {
            merged.push(best);
            continue;
        }

        let weight_sum: f64 = cluster.iter().map(|c| c.weight).sum();
        let dim = best.mean.len();
        let mut mean = DVector::zeros(dim);
        for c in &cluster {
            mean += &c.mean * c.weight;
        }
        mean /= weight_sum;

        let mut covariance = DMatrix::zeros(dim, dim);
        for c in &cluster {
            let diff = &c.mean - &mean;
            covariance += (&c.covariance + diff.clone() * diff.transpose()) * c.weight;
        }
        covariance /= weight_sum;

        merged.push(GaussianComponent::new(mean, covariance, weight_sum, best.tag, best.timestamp));
    }

    Ok(merged)
}

fn cap(mut components: Vec<GaussianComponent>, max_components: Option<usize>) -> Vec<GaussianComponent> {
    if let Some(max) = max_components {
        if components.len() > max {
            components.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
            components.truncate(max);
        }
    }
    components
}

/// Runs prune → merge → (optional) cap, in order.
pub fn reduce(
    components: Vec<GaussianComponent>,
    prune_threshold: f64,
    merge_threshold: f64,
    max_components: Option<usize>,
) -> Result<Vec<GaussianComponent>, TrackingError> {
    let pruned = prune(components, prune_threshold);
    let merged = merge(pruned, merge_threshold)?;
    Ok(cap(merged, max_components))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uuid::Uuid;

    #[test]
    fn merge_preserves_moments() {
        let a = GaussianComponent::new(
            DVector::from_vec(vec![0.0]),
            DMatrix::identity(1, 1),
            0.5,
            Uuid::new_v4(),
            0.0,
        );
        let b = GaussianComponent::new(
            DVector::from_vec(vec![0.1]),
            DMatrix::identity(1, 1),
            0.5,
            Uuid::new_v4(),
            0.0,
        );
        let reduced = reduce(vec![a, b], 0.0, 16.0, None).unwrap();
        assert_eq!(reduced.len(), 1);
        assert_relative_eq!(reduced[0].weight, 1.0, epsilon = 1e-12);
        assert_relative_eq!(reduced[0].mean[0], 0.05, epsilon = 1e-12);
        assert_relative_eq!(reduced[0].covariance[(0, 0)], 1.0025, epsilon = 1e-12);
    }

    #[test]
    fn prune_removes_low_weight_components() {
        let a = GaussianComponent::new(DVector::from_vec(vec![0.0]), DMatrix::identity(1, 1), 1e-6, Uuid::new_v4(), 0.0);
        let reduced = reduce(vec![a], 1e-5, 16.0, None).unwrap();
        assert!(reduced.is_empty());
    }
}
