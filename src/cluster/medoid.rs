//! Medoid update: re-center each cluster on its best member.
//!
//! Unlike k-means, the new center is always an actual item. For each cluster
//! every member is tried as the center, costing `O(|members|²)` distance
//! lookups per cluster.

use super::partition::{cluster_cost, Partition};
use crate::matrix::DistanceMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Find the member that minimizes the cluster's total distance.
///
/// Returns `(medoid, cost)`, or `None` for an empty member list. Ties keep the
/// first member in iteration order.
pub fn best_medoid(matrix: &DistanceMatrix, members: &[usize]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for &candidate in members {
        let cost = cluster_cost(matrix, members, candidate);
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((candidate, cost)),
        }
    }
    best
}

/// Search the best medoid of every cluster without touching the partition.
///
/// A cluster with no members keeps its current medoid. Since medoids are
/// pinned to their own cluster during assignment this does not happen in
/// practice.
pub(crate) fn best_medoids(matrix: &DistanceMatrix, partition: &Partition) -> Vec<usize> {
    let search = |cluster: usize| -> usize {
        best_medoid(matrix, partition.members(cluster))
            .map_or(partition.medoids()[cluster], |(medoid, _)| medoid)
    };

    #[cfg(feature = "parallel")]
    let medoids: Vec<usize> = (0..partition.k()).into_par_iter().map(search).collect();

    #[cfg(not(feature = "parallel"))]
    let medoids: Vec<usize> = (0..partition.k()).map(search).collect();

    medoids
}
