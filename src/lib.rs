// Modules
pub mod classifier;
pub mod data;
pub mod errors;
pub mod gini;
pub mod node;
pub mod splitter;
pub mod svmlight;
pub mod tree;

// Individual classes, and functions
pub use classifier::DecisionTreeClassifier;
pub use data::Matrix;
