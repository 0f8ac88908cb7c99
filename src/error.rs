use thiserror::Error;

/// Errors returned by matrix construction and clustering in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input has no items.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Requested cluster count is incompatible with the dataset.
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of items in the dataset.
        n_items: usize,
    },

    /// A matrix row (or label list) does not have the expected length.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Found length.
        found: usize,
    },

    /// A distance matrix entry violates the matrix contract.
    #[error("malformed distance matrix at ({row}, {col}): {message}")]
    MalformedMatrix {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// Which constraint was violated.
        message: &'static str,
    },

    /// An item's total distance to all items is zero (or not representable),
    /// so its centrality contribution cannot be normalized.
    #[error("degenerate input: total distance from item {item} is zero or overflows")]
    DegenerateInput {
        /// Index of the item whose row sums to zero.
        item: usize,
    },

    /// Other error, e.g. from an external distance source.
    #[error("{0}")]
    Other(String),
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal warning: the iteration cap was reached before the cost stopped
/// improving. The best partition found so far is still returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("k-medoids did not converge within {iterations} iterations")]
pub struct NonConvergence {
    /// Number of refinement iterations performed.
    pub iterations: usize,
}
