//! Deterministic k-medoids clustering.
//!
//! `medoids` groups items into k clusters given only a precomputed matrix of
//! pairwise distances (travel times between addresses, say). Where the
//! distances come from is up to the caller.
//!
//! - [`DistanceMatrix`]: validated symmetric input, with helpers to fill it
//!   from an external source one pair at a time.
//! - [`cluster`]: the k-medoids algorithm, its building blocks, and the
//!   per-iteration snapshot sequence.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod matrix;

pub use cluster::{
    Cluster, Clustering, KMedoids, KMedoidsFit, LabeledCluster, Refinement, Snapshot,
};
pub use error::{Error, NonConvergence, Result};
pub use matrix::{DistanceMatrix, DEFAULT_SYMMETRY_TOL};
