//! Functional dependency detection and attribute closure.

mod closure;
mod dependency;
mod detector;

pub use closure::closure;
pub use dependency::FunctionalDependency;
pub use detector::{DependencyTest, DetectorConfig, FdDetector};
