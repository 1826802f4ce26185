use crate::data::Matrix;
use crate::gini::gini_unchecked;
use crate::node::{majority_class, Node, NodeKind};
use crate::splitter::best_split;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};

/// A fitted decision tree.
///
/// Built once by [`Tree::fit`] and never mutated afterwards, so shared
/// read-only prediction from multiple threads is safe.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tree {
    /// Root of the tree.
    pub root: Node,
    /// Depth of the deepest node, the root sits at depth 0.
    pub depth: usize,
    /// Number of leaves.
    pub n_leaves: usize,
    /// Number of classes the tree predicts over.
    pub num_classes: usize,
}

impl Tree {
    /// Grow a tree over the full dataset.
    ///
    /// Inputs are validated by the caller: `data` is non-empty and every
    /// label is in `[0, num_classes)`. The caller's data is never mutated,
    /// each node works on its own row-index vector.
    pub fn fit(data: &Matrix<f64>, y: &[usize], max_depth: usize, num_classes: usize) -> Self {
        let mut depth = 0;
        let mut n_leaves = 0;
        let index = data.index.clone();
        let root = grow(data, y, index, 0, max_depth, num_classes, &mut depth, &mut n_leaves);
        Tree {
            root,
            depth,
            n_leaves,
            num_classes,
        }
    }

    /// Predict the class of a single row by walking from the root,
    /// strictly-less-than goes left, everything else right.
    pub fn predict_row(&self, row: &[f64]) -> usize {
        let mut node = &self.root;
        loop {
            match &node.kind {
                NodeKind::Leaf => return node.predicted_class,
                NodeKind::Internal {
                    split_feature,
                    split_value,
                    left,
                    right,
                } => {
                    node = if row[*split_feature] < *split_value { left } else { right };
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn grow(
    data: &Matrix<f64>,
    y: &[usize],
    index: Vec<usize>,
    depth: usize,
    max_depth: usize,
    num_classes: usize,
    tree_depth: &mut usize,
    n_leaves: &mut usize,
) -> Node {
    let sample_count = index.len();
    let mut class_counts = vec![0_usize; num_classes];
    for &i in &index {
        class_counts[y[i]] += 1;
    }
    let impurity = gini_unchecked(&class_counts, sample_count);
    let predicted_class = majority_class(&class_counts);
    *tree_depth = max(*tree_depth, depth);

    let kind = if depth >= max_depth || sample_count <= 1 {
        NodeKind::Leaf
    } else {
        match best_split(data, y, &index, &class_counts, impurity) {
            None => NodeKind::Leaf,
            Some(split) => {
                let col = data.get_col(split.split_feature);
                // Partition keeps relative row order on both sides, so child
                // subsets stay in input order and growth is deterministic.
                let (left_index, right_index): (Vec<usize>, Vec<usize>) =
                    index.into_iter().partition(|&i| col[i] < split.split_value);
                let left = grow(
                    data,
                    y,
                    left_index,
                    depth + 1,
                    max_depth,
                    num_classes,
                    tree_depth,
                    n_leaves,
                );
                let right = grow(
                    data,
                    y,
                    right_index,
                    depth + 1,
                    max_depth,
                    num_classes,
                    tree_depth,
                    n_leaves,
                );
                NodeKind::Internal {
                    split_feature: split.split_feature,
                    split_value: split.split_value,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
        }
    };
    if matches!(kind, NodeKind::Leaf) {
        *n_leaves += 1;
    }
    Node {
        impurity,
        sample_count,
        class_counts,
        predicted_class,
        kind,
    }
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut print_buffer: Vec<(&Node, usize)> = vec![(&self.root, 0)];
        let mut r = String::new();
        while let Some((node, depth)) = print_buffer.pop() {
            r += format!("{}{}\n", "      ".repeat(depth).as_str(), node).as_str();
            if let NodeKind::Internal { left, right, .. } = &node.kind {
                print_buffer.push((right, depth + 1));
                print_buffer.push((left, depth + 1));
            }
        }
        write!(f, "{}", r)
    }
}
