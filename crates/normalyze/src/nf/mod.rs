//! Normal form classification (1NF, 2NF, 3NF).

mod checker;
mod report;

pub use checker::{is_partial_dependency, is_transitive_dependency, NormalFormChecker};
pub use report::{FormCheck, NormalForm, NormalFormReport, NormalFormViolation};
