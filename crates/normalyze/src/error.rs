//! Error types for the Normalyze library.

use thiserror::Error;

/// Main error type for Normalyze operations.
///
/// Only fatal input conditions are errors. Degenerate computations (zero-row
/// dependency tests) and exceeded search bounds produce ordinary fallback
/// values instead; "no FD found" and "no violation found" are empty
/// collections, never errors.
#[derive(Debug, Error)]
pub enum NormalyzeError {
    /// The dataset contains no rows.
    #[error("Empty dataset: at least one row is required")]
    EmptyDataset,

    /// The attribute universe is empty.
    #[error("Empty attribute universe: at least one attribute is required")]
    EmptyAttributes,

    /// The attribute universe contains a duplicate name.
    #[error("Duplicate attribute '{attribute}' in the attribute universe")]
    DuplicateAttribute { attribute: String },

    /// A row is missing an attribute declared in the universe.
    #[error("Row {row} is missing attribute '{attribute}'")]
    MissingAttribute { row: usize, attribute: String },

    /// A row carries an attribute not declared in the universe.
    #[error("Row {row} has unknown attribute '{attribute}'")]
    UnknownAttribute { row: usize, attribute: String },

    /// A functional dependency with no determinant attributes.
    #[error("Empty determinant: a dependency needs at least one determinant attribute")]
    EmptyDeterminant,

    /// A functional dependency whose dependent appears in its determinant.
    #[error("Trivial dependency: '{dependent}' appears in its own determinant")]
    TrivialDependency { dependent: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Normalyze operations.
pub type Result<T> = std::result::Result<T, NormalyzeError>;
