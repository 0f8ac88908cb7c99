//! K-medoids clustering (Park & Jun, 2009).
//!
//! Partitions items into k clusters, each centered on one of the items (its
//! **medoid**), minimizing the total distance from every item to its medoid:
//!
//! ```text
//! cost = Σᵢ d(i, medoid(cluster(i)))
//! ```
//!
//! # The Algorithm
//!
//! 1. **Init**: pick the k items with the smallest centrality weight
//!    (see [`initial_medoids`](super::initial_medoids)).
//! 2. **Assign**: each item → nearest medoid. Record the cost.
//! 3. **Update**: each cluster → the member minimizing in-cluster distance.
//! 4. **Assign** again. If the cost did not drop, stop and keep the partition
//!    from before this step; otherwise repeat from 3.
//!
//! **Why it terminates**: an accepted iteration strictly lowers the cost, which
//! is bounded below by 0, and there are finitely many medoid sets.
//! `max_iter` still caps the loop; hitting it yields a
//! [`NonConvergence`] warning rather than an error.
//!
//! # Differences from k-means
//!
//! - Needs only pairwise distances, not coordinates. Any dissimilarity works
//!   (travel times, edit distances, ...), including non-metric ones.
//! - Centers are real items, so results are interpretable ("this depot").
//! - Fully deterministic: there is no random seeding.

use super::init::initial_medoids;
use super::medoid::best_medoids;
use super::partition::{Cluster, Partition, Snapshot};
use super::traits::Clustering;
use crate::error::{Error, NonConvergence, Result};
use crate::matrix::DistanceMatrix;
use log::{debug, trace, warn};

/// K-medoids clustering algorithm.
#[derive(Debug, Clone)]
pub struct KMedoids {
    /// Number of clusters.
    k: usize,
    /// Maximum accepted refinement iterations.
    max_iter: usize,
    /// Minimum cost decrease for an iteration to be accepted.
    tol: f64,
}

impl KMedoids {
    /// Create a new k-medoids clusterer.
    ///
    /// Defaults: `max_iter = 100`, `tol = 0.0` (any strict decrease counts).
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: 100,
            tol: 0.0,
        }
    }

    /// Set maximum refinement iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the minimum cost decrease required to accept an iteration.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Run to convergence from the deterministic initial medoids.
    pub fn fit(&self, matrix: &DistanceMatrix) -> Result<KMedoidsFit> {
        Ok(self.refine(matrix)?.finish())
    }

    /// Run to convergence from caller-supplied medoids.
    pub fn fit_from(&self, matrix: &DistanceMatrix, medoids: Vec<usize>) -> Result<KMedoidsFit> {
        Ok(self.refine_from(matrix, medoids)?.finish())
    }

    /// Start a run and return it as a sequence of partition snapshots.
    ///
    /// The first snapshot is the initial assignment; each further one is an
    /// accepted refinement. See [`Refinement`].
    pub fn refine<'a>(&self, matrix: &'a DistanceMatrix) -> Result<Refinement<'a>> {
        self.validate(matrix)?;
        let medoids = initial_medoids(matrix, self.k)?;
        debug!("k-medoids: initial medoids {medoids:?}");
        Ok(self.start(matrix, medoids))
    }

    /// Like [`KMedoids::refine`], but skip initial medoid selection.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `medoids` holds exactly `k` distinct
    /// item indices.
    pub fn refine_from<'a>(
        &self,
        matrix: &'a DistanceMatrix,
        medoids: Vec<usize>,
    ) -> Result<Refinement<'a>> {
        self.validate(matrix)?;

        if medoids.len() != self.k {
            return Err(Error::InvalidParameter {
                name: "medoids",
                message: "must contain exactly k items",
            });
        }
        let mut seen = vec![false; matrix.len()];
        for &m in &medoids {
            if m >= matrix.len() {
                return Err(Error::InvalidParameter {
                    name: "medoids",
                    message: "item index out of range",
                });
            }
            if std::mem::replace(&mut seen[m], true) {
                return Err(Error::InvalidParameter {
                    name: "medoids",
                    message: "must be distinct",
                });
            }
        }

        Ok(self.start(matrix, medoids))
    }

    fn validate(&self, matrix: &DistanceMatrix) -> Result<()> {
        let n = matrix.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: n,
            });
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(Error::InvalidParameter {
                name: "tol",
                message: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    fn start<'a>(&self, matrix: &'a DistanceMatrix, medoids: Vec<usize>) -> Refinement<'a> {
        let partition = Partition::new(matrix, medoids);
        let cost = partition.cost(matrix);
        debug!("k-medoids: initial cost {cost}");

        Refinement {
            matrix,
            partition,
            cost,
            iteration: 0,
            max_iter: self.max_iter,
            tol: self.tol,
            phase: Phase::Assigned,
            history: Vec::new(),
            warning: None,
        }
    }
}

impl Clustering for KMedoids {
    fn fit_predict(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>> {
        Ok(self.fit(matrix)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Initial assignment done, not yet reported.
    Assigned,
    Refining,
    Converged,
}

/// An in-progress k-medoids run.
///
/// Iterating yields one [`Snapshot`] for the initial assignment and one per
/// accepted refinement, in order, each with a strictly lower cost than the
/// one before. The sequence ends when the cost stops improving (or
/// `max_iter` is hit) and cannot be restarted. Use [`Refinement::finish`] to
/// run any remaining steps and obtain the result.
#[derive(Debug)]
pub struct Refinement<'a> {
    matrix: &'a DistanceMatrix,
    partition: Partition,
    cost: f64,
    iteration: usize,
    max_iter: usize,
    tol: f64,
    phase: Phase,
    history: Vec<Snapshot>,
    warning: Option<NonConvergence>,
}

impl Refinement<'_> {
    /// Cost of the current (best accepted) partition.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of accepted refinement iterations so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the run has stopped.
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Converged
    }

    /// Run to the end and return the final partition.
    pub fn finish(mut self) -> KMedoidsFit {
        while self.next().is_some() {}

        KMedoidsFit {
            clusters: self.partition.clusters(),
            labels: self.partition.assignment().to_vec(),
            cost: self.cost,
            iterations: self.iteration,
            history: self.history,
            warning: self.warning,
        }
    }

    fn record(&mut self) -> Snapshot {
        let snapshot = self.partition.snapshot(self.iteration, self.cost);
        self.history.push(snapshot.clone());
        snapshot
    }

    /// Try one update + assignment round. Returns whether it was accepted.
    fn step(&mut self) -> bool {
        let mut candidate = self.partition.clone();
        candidate.set_medoids(best_medoids(self.matrix, &self.partition));
        let moved = candidate.assign(self.matrix);
        let cost = candidate.cost(self.matrix);

        if cost >= self.cost - self.tol {
            trace!(
                "k-medoids: candidate cost {cost} does not improve on {}, stopping",
                self.cost
            );
            return false;
        }

        // Still improving, but the cap forbids accepting another iteration.
        if self.iteration >= self.max_iter {
            let warning = NonConvergence {
                iterations: self.iteration,
            };
            warn!("{warning}; keeping partition with cost {}", self.cost);
            self.warning = Some(warning);
            return false;
        }

        self.partition = candidate;
        self.cost = cost;
        self.iteration += 1;
        debug!(
            "k-medoids: iteration {} cost {cost} ({moved} items moved)",
            self.iteration
        );
        true
    }
}

impl Iterator for Refinement<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        match self.phase {
            Phase::Assigned => {
                self.phase = Phase::Refining;
                Some(self.record())
            }
            Phase::Refining => {
                if self.step() {
                    Some(self.record())
                } else {
                    self.phase = Phase::Converged;
                    None
                }
            }
            Phase::Converged => None,
        }
    }
}

/// Result of a k-medoids run.
#[derive(Debug, Clone)]
pub struct KMedoidsFit {
    clusters: Vec<Cluster>,
    labels: Vec<usize>,
    cost: f64,
    iterations: usize,
    history: Vec<Snapshot>,
    warning: Option<NonConvergence>,
}

/// A final cluster expressed through caller-provided labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCluster<'a, L> {
    /// Label of the medoid.
    pub medoid: &'a L,
    /// Labels of all members, in item order.
    pub members: Vec<&'a L>,
}

impl KMedoidsFit {
    /// The k clusters, in cluster-id order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Cluster id of every item.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Medoid item of every cluster.
    pub fn medoids(&self) -> Vec<usize> {
        self.clusters.iter().map(|c| c.medoid).collect()
    }

    /// Total distance from every item to its medoid.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of accepted refinement iterations.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Every partition the run went through, starting with the initial
    /// assignment. The last entry is the final partition.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Whether the run stopped because the cost stopped improving.
    pub fn converged(&self) -> bool {
        self.warning.is_none()
    }

    /// Set if the iteration cap was hit.
    pub fn warning(&self) -> Option<NonConvergence> {
        self.warning
    }

    /// Map the clusters onto item labels (`labels[i]` names item `i`).
    ///
    /// Labels are only displayed, never compared, so duplicates are fine.
    pub fn labeled<'a, L>(&self, labels: &'a [L]) -> Result<Vec<LabeledCluster<'a, L>>> {
        if labels.len() != self.labels.len() {
            return Err(Error::DimensionMismatch {
                expected: self.labels.len(),
                found: labels.len(),
            });
        }

        Ok(self
            .clusters
            .iter()
            .map(|c| LabeledCluster {
                medoid: &labels[c.medoid],
                members: c.members.iter().map(|&i| &labels[i]).collect(),
            })
            .collect())
    }
}
