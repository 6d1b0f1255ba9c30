//! Normalyze: a relational normalization engine for tabular sample data.
//!
//! Given a relation sample (rows plus an attribute universe), Normalyze
//! detects the functional dependencies that appear to hold, derives minimal
//! candidate keys, classifies compliance with 1NF/2NF/3NF, and produces a
//! lossless decomposition into normalized tables.
//!
//! # Core Principles
//!
//! - **Pure**: every operation is a synchronous function of its explicit
//!   inputs; nothing is cached across datasets and there is no global state.
//! - **Bounded**: FD detection and key search are deliberate heuristics with
//!   documented caps; exceeding a cap degrades to a best-effort fallback,
//!   never an error.
//! - **No I/O**: parsing, SQL generation, and persistence are caller
//!   responsibilities.
//!
//! # Example
//!
//! ```
//! use normalyze::{Dataset, Normalyze};
//! use serde_json::json;
//!
//! let rows = vec![
//!     [("id".to_string(), json!(1)), ("name".to_string(), json!("Alice"))]
//!         .into_iter()
//!         .collect(),
//!     [("id".to_string(), json!(2)), ("name".to_string(), json!("Bob"))]
//!         .into_iter()
//!         .collect(),
//! ];
//! let dataset = Dataset::new(vec!["id".into(), "name".into()], rows).unwrap();
//!
//! let result = Normalyze::new().analyze(&dataset).unwrap();
//! println!("Current form: {}", result.forms.current_form);
//! ```

pub mod decompose;
pub mod error;
pub mod fd;
pub mod input;
pub mod keys;
pub mod nf;

mod normalyze;

pub use crate::normalyze::{AnalysisResult, AnalysisSummary, Normalyze, NormalyzeConfig};
pub use decompose::{
    verify_lossless, ForeignKey, LosslessCheck, NormalizationStage, SchemaDecomposer, TableSchema,
};
pub use error::{NormalyzeError, Result};
pub use fd::{closure, DependencyTest, DetectorConfig, FdDetector, FunctionalDependency};
pub use input::{Dataset, Row};
pub use keys::{CancelToken, CandidateKeyFinder, KeySearch, KeySearchConfig};
pub use nf::{FormCheck, NormalForm, NormalFormChecker, NormalFormReport, NormalFormViolation};
