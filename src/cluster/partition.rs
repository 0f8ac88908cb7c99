//! Partition state: which item belongs to which medoid, and what it costs.
//!
//! Items and clusters live in two arenas indexed by integer id. An item's
//! current cluster is an index into the cluster arena, and each cluster's
//! member list is rebuilt from that assignment vector, so an item can never
//! be owned by two clusters (or none) at the same time.

use crate::matrix::DistanceMatrix;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One cluster of a partition, by item index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Item chosen as the cluster's center.
    pub medoid: usize,
    /// Member items in ascending index order. Always contains `medoid`.
    pub members: Vec<usize>,
}

/// A value copy of the partition after one step of the algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// 0 for the initial assignment, then one per accepted refinement.
    pub iteration: usize,
    /// Total cost of this partition.
    pub cost: f64,
    /// The k clusters, in cluster-id order.
    pub clusters: Vec<Cluster>,
}

/// Mutable partition of `n` items into `k` clusters.
#[derive(Debug, Clone)]
pub(crate) struct Partition {
    /// `cluster_id -> medoid item`.
    medoids: Vec<usize>,
    /// `item -> cluster_id`.
    assignment: Vec<usize>,
    /// `cluster_id -> member items`, ascending.
    members: Vec<Vec<usize>>,
}

impl Partition {
    /// Create clusters around `medoids` and run the first assignment.
    ///
    /// `medoids` must be distinct, in-range item indices.
    pub(crate) fn new(matrix: &DistanceMatrix, medoids: Vec<usize>) -> Self {
        let k = medoids.len();
        let mut partition = Self {
            medoids,
            assignment: vec![0; matrix.len()],
            members: vec![Vec::new(); k],
        };
        partition.assign(matrix);
        partition
    }

    pub(crate) fn medoids(&self) -> &[usize] {
        &self.medoids
    }

    pub(crate) fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    pub(crate) fn members(&self, cluster: usize) -> &[usize] {
        &self.members[cluster]
    }

    pub(crate) fn k(&self) -> usize {
        self.medoids.len()
    }

    /// Replace the medoid of every cluster. Member sets are left as they
    /// are until the next [`Partition::assign`].
    pub(crate) fn set_medoids(&mut self, medoids: Vec<usize>) {
        debug_assert_eq!(medoids.len(), self.medoids.len());
        self.medoids = medoids;
    }

    /// Move every item to the cluster of its nearest medoid.
    ///
    /// Ties go to the lowest cluster id, except that a medoid always stays in
    /// its own cluster. Returns the number of items that changed cluster.
    pub(crate) fn assign(&mut self, matrix: &DistanceMatrix) -> usize {
        let n = self.assignment.len();

        let mut pinned: Vec<Option<usize>> = vec![None; n];
        for (cluster, &medoid) in self.medoids.iter().enumerate() {
            pinned[medoid] = Some(cluster);
        }

        let medoids = &self.medoids;
        let nearest = |item: usize| -> usize {
            if let Some(cluster) = pinned[item] {
                return cluster;
            }
            let row = matrix.row(item);
            let mut best_cluster = 0;
            let mut best_dist = f64::INFINITY;
            for (cluster, &medoid) in medoids.iter().enumerate() {
                let dist = row[medoid];
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = cluster;
                }
            }
            best_cluster
        };

        #[cfg(feature = "parallel")]
        let next: Vec<usize> = (0..n).into_par_iter().map(nearest).collect();

        #[cfg(not(feature = "parallel"))]
        let next: Vec<usize> = (0..n).map(nearest).collect();

        let changed = self
            .assignment
            .iter()
            .zip(&next)
            .filter(|(old, new)| old != new)
            .count();

        for members in &mut self.members {
            members.clear();
        }
        for (item, &cluster) in next.iter().enumerate() {
            self.members[cluster].push(item);
        }
        self.assignment = next;

        changed
    }

    /// Total distance from every item to the medoid of its cluster.
    pub(crate) fn cost(&self, matrix: &DistanceMatrix) -> f64 {
        self.assignment
            .iter()
            .enumerate()
            .map(|(item, &cluster)| matrix.get(item, self.medoids[cluster]))
            .sum()
    }

    pub(crate) fn clusters(&self) -> Vec<Cluster> {
        self.medoids
            .iter()
            .zip(&self.members)
            .map(|(&medoid, members)| Cluster {
                medoid,
                members: members.clone(),
            })
            .collect()
    }

    pub(crate) fn snapshot(&self, iteration: usize, cost: f64) -> Snapshot {
        Snapshot {
            iteration,
            cost,
            clusters: self.clusters(),
        }
    }
}

/// Cost of a single cluster if `center` were its medoid.
#[inline]
pub fn cluster_cost(matrix: &DistanceMatrix, members: &[usize], center: usize) -> f64 {
    let row = matrix.row(center);
    members.iter().map(|&item| row[item]).sum()
}
