use crate::data::Matrix;
use crate::errors::CartError;
use crate::tree::Tree;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// CART decision tree classifier.
///
/// Grows a binary tree by recursively picking the (feature, threshold) split
/// with the lowest weighted Gini impurity, then predicts by majority vote of
/// the leaf a row lands in.
///
/// ```
/// use cartree::{DecisionTreeClassifier, Matrix};
///
/// let flat = vec![1.0, 2.0, 3.0, 4.0];
/// let data = Matrix::new(&flat, 4, 1);
/// let y = vec![0, 0, 1, 1];
///
/// let mut model = DecisionTreeClassifier::new(1);
/// model.fit(&data, &y).unwrap();
///
/// let queries = vec![1.5, 3.5];
/// let preds = model.predict(&Matrix::new(&queries, 2, 1), false).unwrap();
/// assert_eq!(preds, vec![0, 1]);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecisionTreeClassifier {
    /// Maximum depth the tree is allowed to reach, the root sits at depth 0
    /// so `max_depth = 0` yields a single majority-vote leaf.
    pub max_depth: usize,
    /// The fitted tree, `None` until `fit` succeeds.
    pub tree: Option<Tree>,
    /// Number of features seen at fit time.
    n_features: usize,
}

impl DecisionTreeClassifier {
    /// Create a new classifier with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        DecisionTreeClassifier {
            max_depth,
            tree: None,
            n_features: 0,
        }
    }

    /// Fit the tree on `data` with one label per row.
    ///
    /// Labels must form the contiguous range `[0, num_classes)` where
    /// `num_classes` is the number of distinct labels present. All input
    /// problems are surfaced before any tree growth starts.
    pub fn fit(&mut self, data: &Matrix<f64>, y: &[usize]) -> Result<(), CartError> {
        let num_classes = validate_data(data, y)?;
        let tree = Tree::fit(data, y, self.max_depth, num_classes);
        info!(
            "Fitted a decision tree with {} leaves at depth {} over {} classes.",
            tree.n_leaves, tree.depth, tree.num_classes
        );
        self.n_features = data.cols;
        self.tree = Some(tree);
        Ok(())
    }

    /// Predict a class for every row of `data`, in row order.
    ///
    /// With `parallel` set, rows are scored across threads; the tree is
    /// read-only so both paths return identical predictions.
    pub fn predict(&self, data: &Matrix<f64>, parallel: bool) -> Result<Vec<usize>, CartError> {
        let tree = self.tree.as_ref().ok_or(CartError::NotFitted)?;
        if data.cols != self.n_features {
            return Err(CartError::InvalidParameter(
                "data".to_string(),
                format!("{} feature columns", self.n_features),
                format!("{}", data.cols),
            ));
        }
        let preds = if parallel {
            self.predict_parallel(tree, data)
        } else {
            self.predict_single_threaded(tree, data)
        };
        Ok(preds)
    }

    fn predict_single_threaded(&self, tree: &Tree, data: &Matrix<f64>) -> Vec<usize> {
        data.index.iter().map(|i| tree.predict_row(&data.get_row(*i))).collect()
    }

    fn predict_parallel(&self, tree: &Tree, data: &Matrix<f64>) -> Vec<usize> {
        data.index
            .par_iter()
            .map(|i| tree.predict_row(&data.get_row(*i)))
            .collect()
    }

    /// Number of classes of the fitted tree.
    pub fn num_classes(&self) -> Option<usize> {
        self.tree.as_ref().map(|t| t.num_classes)
    }
}

/// Check the dataset invariants and derive the number of classes.
fn validate_data(data: &Matrix<f64>, y: &[usize]) -> Result<usize, CartError> {
    if data.rows == 0 {
        return Err(CartError::EmptyDataset);
    }
    if data.rows != y.len() {
        return Err(CartError::LengthMismatch(data.rows, y.len()));
    }
    // There can be at most one class per sample, so `seen` is sized by the
    // sample count and arbitrarily large labels never drive an allocation.
    let mut seen = vec![false; y.len()];
    for &label in y {
        if label < y.len() {
            seen[label] = true;
        }
    }
    let num_classes = seen.iter().filter(|&&s| s).count();
    // Labels must cover [0, num_classes) with no gaps.
    for &label in y {
        if label >= num_classes {
            return Err(CartError::LabelOutOfRange(label, num_classes));
        }
    }
    Ok(num_classes)
}
