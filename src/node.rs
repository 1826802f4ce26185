use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a fitted decision tree.
///
/// Every node carries the statistics of the training subset that reached it,
/// which is all that majority-vote prediction needs. Whether the node splits
/// further is captured by [`NodeKind`], so an internal node always has both
/// children and a leaf has neither.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Node {
    /// Gini impurity of the label distribution at this node.
    pub impurity: f64,
    /// Number of training samples that reached this node.
    pub sample_count: usize,
    /// Count of each class among the samples that reached this node.
    pub class_counts: Vec<usize>,
    /// The class with the maximum count, lowest class index on ties.
    pub predicted_class: usize,
    /// Leaf or internal split.
    pub kind: NodeKind,
}

/// Leaf or internal marker, an internal node owns both children.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum NodeKind {
    Leaf,
    Internal {
        /// Index of the feature the node splits on.
        split_feature: usize,
        /// Threshold of the split, values strictly below go left.
        split_value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }
}

/// The class index holding the maximum count, scanning in order so that
/// ties resolve to the lowest class index.
pub fn majority_class(class_counts: &[usize]) -> usize {
    let mut best = 0;
    for (c, &count) in class_counts.iter().enumerate() {
        if count > class_counts[best] {
            best = c;
        }
    }
    best
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            NodeKind::Leaf => write!(
                f,
                "leaf={},count={},gini={}",
                self.predicted_class, self.sample_count, self.impurity
            ),
            NodeKind::Internal {
                split_feature,
                split_value,
                ..
            } => write!(
                f,
                "[{} < {}] count={},gini={}",
                split_feature, split_value, self.sample_count, self.impurity
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_class() {
        assert_eq!(majority_class(&[1, 4, 2]), 1);
        assert_eq!(majority_class(&[5, 0, 0]), 0);
        // Ties resolve to the lowest class index.
        assert_eq!(majority_class(&[0, 3, 3]), 1);
        assert_eq!(majority_class(&[2, 2, 2]), 0);
    }

    #[test]
    fn test_node_display() {
        let leaf = Node {
            impurity: 0.0,
            sample_count: 3,
            class_counts: vec![3, 0],
            predicted_class: 0,
            kind: NodeKind::Leaf,
        };
        assert_eq!(format!("{}", leaf), "leaf=0,count=3,gini=0");
        let parent = Node {
            impurity: 0.5,
            sample_count: 6,
            class_counts: vec![3, 3],
            predicted_class: 0,
            kind: NodeKind::Internal {
                split_feature: 1,
                split_value: 2.5,
                left: Box::new(leaf.clone()),
                right: Box::new(leaf),
            },
        };
        assert_eq!(format!("{}", parent), "[1 < 2.5] count=6,gini=0.5");
    }
}
