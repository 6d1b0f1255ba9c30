//! Input data model: the caller-supplied dataset.

mod dataset;

pub use dataset::{Dataset, Row};
