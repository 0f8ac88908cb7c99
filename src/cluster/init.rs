//! Deterministic initial medoid selection (Park & Jun, 2009).
//!
//! Every item `i` gets a centrality weight
//!
//! ```text
//! v(i) = Σ_h  d(h, i) / Σ_j d(h, j)
//! ```
//!
//! Each item `h` spreads a unit of "distance mass" over all items in
//! proportion to how far they are from it; `v(i)` is the mass `i` receives.
//! Items that are proportionally close to many others receive little, so the
//! k smallest weights serve as initial medoids near dense regions.
//!
//! No randomness is involved: ties are broken by item index.

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

/// Compute the centrality weight `v(i)` of every item.
///
/// # Errors
///
/// [`Error::DegenerateInput`] if some row sums to zero (or overflows to
/// infinity), since its normalization is undefined.
pub fn centrality_weights(matrix: &DistanceMatrix) -> Result<Vec<f64>> {
    let n = matrix.len();
    let mut weights = vec![0.0; n];

    for h in 0..n {
        let total = matrix.row_sum(h);
        if !total.is_finite() || total <= 0.0 {
            return Err(Error::DegenerateInput { item: h });
        }
        for (w, &d) in weights.iter_mut().zip(matrix.row(h)) {
            *w += d / total;
        }
    }

    Ok(weights)
}

/// Select the `k` items with the smallest centrality weight.
///
/// The result is ordered by increasing weight; equal weights keep index order.
///
/// # Errors
///
/// - [`Error::InvalidClusterCount`] if `k == 0` or `k > n`.
/// - [`Error::DegenerateInput`] as in [`centrality_weights`].
pub fn initial_medoids(matrix: &DistanceMatrix, k: usize) -> Result<Vec<usize>> {
    let n = matrix.len();
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }

    let weights = centrality_weights(matrix)?;
    let mut order: Vec<usize> = (0..n).collect();
    // Stable, and weights are finite, so `total_cmp` agrees with `<`.
    order.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));
    order.truncate(k);
    Ok(order)
}
