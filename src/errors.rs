//! Errors
//!
//! Custom error types used throughout the `cartree` crate.
use thiserror::Error;

/// Errors that can occur when fitting or using a decision tree.
#[derive(Debug, Error)]
pub enum CartError {
    /// Training was attempted on an empty dataset.
    #[error("Training data must contain at least one sample.")]
    EmptyDataset,
    /// Rows and labels do not line up.
    #[error("Data has {0} rows but {1} labels were provided.")]
    LengthMismatch(usize, usize),
    /// A label fell outside the valid class range.
    #[error("Label {0} is outside the valid class range [0, {1}).")]
    LabelOutOfRange(usize, usize),
    /// Gini impurity requested for an empty sample set.
    #[error("Gini impurity is undefined for an empty sample set.")]
    DegenerateImpurity,
    /// Prediction was attempted before a successful fit.
    #[error("This model has not been fit, call fit before predicting.")]
    NotFitted,
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// A line of svmlight data could not be parsed.
    #[error("Unable to parse svmlight data at line {0}: {1}")]
    Parse(usize, String),
}
