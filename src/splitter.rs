//! Splitter
//!
//! Exhaustive best-split search over every feature and every threshold that
//! separates two distinct observed values.
use crate::data::Matrix;
use crate::gini::gini_unchecked;
use serde::{Deserialize, Serialize};

/// The best split found for a node.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SplitInfo {
    /// Feature the split tests.
    pub split_feature: usize,
    /// Threshold, the midpoint of the two adjacent distinct sorted values.
    pub split_value: f64,
    /// Weighted average child impurity of the split.
    pub cost: f64,
}

/// Search for the split minimizing the weighted average child impurity,
/// `(n_left * gini_left + n_right * gini_right) / m`.
///
/// * `y` - labels for the full training set, addressed through `index`.
/// * `index` - rows of the subset reaching the node being split.
/// * `parent_counts` - per-class counts over that subset, its length fixes
///   the number of classes.
/// * `parent_impurity` - impurity of the subset, a split must strictly beat
///   it or `None` is returned.
///
/// For each feature the subset is sorted by value and a single sweep moves
/// samples from the right child to the left, updating the class counts
/// incrementally. Split points that sit between two equal values are
/// skipped, they would not separate any samples. Ties on cost keep the
/// first candidate in feature-then-position order.
pub fn best_split(
    data: &Matrix<f64>,
    y: &[usize],
    index: &[usize],
    parent_counts: &[usize],
    parent_impurity: f64,
) -> Option<SplitInfo> {
    let m = index.len();
    if m <= 1 {
        return None;
    }
    let num_classes = parent_counts.len();

    let mut best: Option<SplitInfo> = None;
    let mut best_cost = parent_impurity;

    let mut pairs: Vec<(f64, usize)> = Vec::with_capacity(m);
    for feature in 0..data.cols {
        let col = data.get_col(feature);
        pairs.clear();
        pairs.extend(index.iter().map(|&i| (col[i], y[i])));
        // Stable sort keeps equal values in input order, so reruns on the
        // same data walk the exact same candidates.
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut num_left = vec![0_usize; num_classes];
        let mut num_right = parent_counts.to_vec();
        for j in 1..m {
            let c = pairs[j - 1].1;
            num_left[c] += 1;
            num_right[c] -= 1;
            if pairs[j].0 == pairs[j - 1].0 {
                continue;
            }
            let gini_left = gini_unchecked(&num_left, j);
            let gini_right = gini_unchecked(&num_right, m - j);
            let cost = (j as f64 * gini_left + (m - j) as f64 * gini_right) / m as f64;
            if cost < best_cost {
                best_cost = cost;
                best = Some(SplitInfo {
                    split_feature: feature,
                    split_value: (pairs[j - 1].0 + pairs[j].0) / 2.0,
                    cost,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gini::gini_impurity;

    fn counts_of(y: &[usize], num_classes: usize) -> Vec<usize> {
        let mut counts = vec![0; num_classes];
        for &c in y {
            counts[c] += 1;
        }
        counts
    }

    #[test]
    fn test_best_split_simple() {
        let v = vec![1.0, 2.0, 3.0, 4.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![0, 0, 1, 1];
        let counts = counts_of(&y, 2);
        let parent = gini_impurity(&counts, 4).unwrap();
        let split = best_split(&data, &y, &[0, 1, 2, 3], &counts, parent).unwrap();
        assert_eq!(split.split_feature, 0);
        assert_eq!(split.split_value, 2.5);
        assert_eq!(split.cost, 0.0);
    }

    #[test]
    fn test_best_split_too_small() {
        let v = vec![5.0];
        let data = Matrix::new(&v, 1, 1);
        assert!(best_split(&data, &[0], &[0], &[1], 0.0).is_none());
    }

    #[test]
    fn test_best_split_pure_parent() {
        // Impurity already 0, nothing can strictly improve it.
        let v = vec![1.0, 2.0, 3.0];
        let data = Matrix::new(&v, 3, 1);
        let y = vec![1, 1, 1];
        let counts = counts_of(&y, 2);
        let parent = gini_impurity(&counts, 3).unwrap();
        assert!(best_split(&data, &y, &[0, 1, 2], &counts, parent).is_none());
    }

    #[test]
    fn test_best_split_constant_feature() {
        // Every candidate sits between equal values and is skipped.
        let v = vec![7.0, 7.0, 7.0, 7.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![0, 1, 0, 1];
        let counts = counts_of(&y, 2);
        let parent = gini_impurity(&counts, 4).unwrap();
        assert!(best_split(&data, &y, &[0, 1, 2, 3], &counts, parent).is_none());
    }

    #[test]
    fn test_best_split_feature_tie_break() {
        // Both features separate the classes perfectly, the first one wins.
        let v = vec![
            1.0, 1.0, 3.0, 3.0, // feature 0
            10.0, 10.0, 20.0, 20.0, // feature 1
        ];
        let data = Matrix::new(&v, 4, 2);
        let y = vec![0, 0, 1, 1];
        let counts = counts_of(&y, 2);
        let parent = gini_impurity(&counts, 4).unwrap();
        let split = best_split(&data, &y, &[0, 1, 2, 3], &counts, parent).unwrap();
        assert_eq!(split.split_feature, 0);
        assert_eq!(split.split_value, 2.0);
    }

    #[test]
    fn test_best_split_subset_only() {
        // Rows outside the index must not influence the search.
        let v = vec![1.0, 2.0, 100.0, 3.0, 4.0];
        let data = Matrix::new(&v, 5, 1);
        let y = vec![0, 0, 1, 1, 1];
        let index = vec![0, 1, 3, 4];
        let counts = counts_of(&[0, 0, 1, 1], 2);
        let parent = gini_impurity(&counts, 4).unwrap();
        let split = best_split(&data, &y, &index, &counts, parent).unwrap();
        assert_eq!(split.split_value, 2.5);
    }

    #[test]
    fn test_best_split_weighted_cost() {
        // 1|2 2 3 on labels 0|1 1 0: the best split isolates the leading 0.
        let v = vec![1.0, 2.0, 2.0, 3.0];
        let data = Matrix::new(&v, 4, 1);
        let y = vec![0, 1, 1, 0];
        let counts = counts_of(&y, 2);
        let parent = gini_impurity(&counts, 4).unwrap();
        let split = best_split(&data, &y, &[0, 1, 2, 3], &counts, parent).unwrap();
        assert_eq!(split.split_value, 1.5);
        // Left is pure, right is 2/3 vs 1/3.
        let expected = (1.0 * 0.0 + 3.0 * (1.0 - (4.0 + 1.0) / 9.0)) / 4.0;
        assert!((split.cost - expected).abs() < 1e-12);
    }
}
