//! K-medoids clustering over a precomputed distance matrix.
//!
//! ## Medoids vs Centroids
//!
//! **K-means** centers each cluster on the *mean* of its points. That needs
//! coordinates, and the mean is usually not a real point.
//!
//! **K-medoids** centers each cluster on one of its *members*. It only needs
//! pairwise distances, so it works for travel times, road distances, edit
//! distances, or any other dissimilarity you can tabulate, and every center
//! is something you can point at on a map.
//!
//! ## The algorithm here
//!
//! The implementation follows Park & Jun (2009), "A simple and fast algorithm
//! for K-medoids clustering" (Expert Syst. Appl. 36):
//!
//! 1. Compute a centrality weight per item and take the k smallest as
//!    initial medoids ([`initial_medoids`]). No randomness.
//! 2. Assign every item to its nearest medoid.
//! 3. Replace every medoid by the member with the smallest total in-cluster
//!    distance ([`best_medoid`]).
//! 4. Reassign. Repeat 3–4 while the total cost
//!
//! ```text
//! cost = Σᵢ d(i, medoid(cluster(i)))
//! ```
//!
//! strictly decreases.
//!
//! **Complexity**: O(n²) for the initial weights, then per iteration O(n·k)
//! for assignment and O(Σ |Cⱼ|²) for the medoid search.
//!
//! ## Usage
//!
//! ```rust
//! use medoids::{Clustering, DistanceMatrix, KMedoids};
//!
//! let matrix = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 10.0, 10.0],
//!     vec![1.0, 0.0, 10.0, 10.0],
//!     vec![10.0, 10.0, 0.0, 1.0],
//!     vec![10.0, 10.0, 1.0, 0.0],
//! ])
//! .unwrap();
//!
//! let labels = KMedoids::new(2).fit_predict(&matrix).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_eq!(labels[2], labels[3]);
//! assert_ne!(labels[0], labels[2]);
//!
//! // Every intermediate partition, e.g. for drawing one map per step.
//! for snapshot in KMedoids::new(2).refine(&matrix).unwrap() {
//!     println!("step {}: cost {}", snapshot.iteration, snapshot.cost);
//! }
//! ```

mod init;
mod kmedoids;
mod medoid;
mod partition;
mod traits;

pub use init::{centrality_weights, initial_medoids};
pub use kmedoids::{KMedoids, KMedoidsFit, LabeledCluster, Refinement};
pub use medoid::best_medoid;
pub use partition::{cluster_cost, Cluster, Snapshot};
pub use traits::Clustering;
