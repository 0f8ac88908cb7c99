use crate::error::Result;
use crate::matrix::DistanceMatrix;

/// Common interface for hard clustering over a distance matrix (one label per item).
pub trait Clustering {
    /// Fit the model and return one cluster label per item of `matrix`.
    fn fit_predict(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
