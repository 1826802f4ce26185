//! Gini
//!
//! The impurity criterion used to score candidate splits. Pure functions,
//! no state.
use crate::errors::CartError;

/// Compute the Gini impurity of a class distribution given per-class
/// counts and the total number of samples.
///
/// For class counts `c[k]` with `total` samples this is
/// `1 - sum((c[k] / total)^2)`. The result is 0 for a pure set and at most
/// `1 - 1/k` for `k` classes.
///
/// `total` must equal `counts.iter().sum()`; an empty set (`total == 0`)
/// has no defined impurity and returns [`CartError::DegenerateImpurity`].
pub fn gini_impurity(counts: &[usize], total: usize) -> Result<f64, CartError> {
    if total == 0 {
        return Err(CartError::DegenerateImpurity);
    }
    Ok(gini_unchecked(counts, total))
}

/// Gini impurity without the empty-set guard, for the split sweep where the
/// caller already knows both children are non-empty.
pub(crate) fn gini_unchecked(counts: &[usize], total: usize) -> f64 {
    debug_assert!(total > 0, "impurity of an empty sample set");
    let total = total as f64;
    1.0 - counts.iter().map(|&c| (c as f64 / total).powi(2)).sum::<f64>()
}
