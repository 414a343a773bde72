//! Error types of the clustering engine.

use thiserror::Error;

/// Errors raised by the [`KMeans`](crate::KMeans) engine.
///
/// Empty clusters and hitting the iteration cap are regular outcomes of a run and
/// are never reported through this type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KMeansError {
    /// A parameter is out of its valid range (e.g. `k < 1`, or more clusters than samples).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two points (or a point and the dataset) disagree in their dimensionality.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the reference (dataset or first point)
        expected: usize,
        /// Dimensionality actually supplied
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, KMeansError>;
