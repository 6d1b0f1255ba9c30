//! Lossless decomposition into normalized table sets.

mod decomposer;
mod schema;

pub use decomposer::{verify_lossless, LosslessCheck, SchemaDecomposer};
pub use schema::{ForeignKey, NormalizationStage, TableSchema};
