//! Admin service errors.

use thiserror::Error;

/// Errors produced by the selection service and catalog loading.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Reading or writing the persisted selection failed.
    #[error("persistence I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted or supplied data is not valid JSON of the expected shape.
    #[error("malformed data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The country is already in the curated list.
    #[error("{country} is already selected")]
    Duplicate {
        /// Country name of the rejected entry.
        country: String,
    },

    /// The country is not in the curated list.
    #[error("{country} is not selected")]
    NotFound {
        /// Country name that was looked up.
        country: String,
    },

    /// A reorder position is out of bounds.
    #[error("position {index} is out of bounds for a list of {len}")]
    InvalidPosition {
        /// The offending position.
        index: usize,
        /// Current list length.
        len: usize,
    },
}
