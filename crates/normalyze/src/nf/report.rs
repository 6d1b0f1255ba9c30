//! Report types for normal form compliance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normal form level, ordered from unnormalized upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NormalForm {
    /// Unnormalized (1NF not satisfied).
    #[serde(rename = "UNF")]
    Unf,
    #[serde(rename = "1NF")]
    First,
    #[serde(rename = "2NF")]
    Second,
    #[serde(rename = "3NF")]
    Third,
}

impl NormalForm {
    /// Short label, e.g. "2NF".
    pub fn label(&self) -> &'static str {
        match self {
            NormalForm::Unf => "UNF",
            NormalForm::First => "1NF",
            NormalForm::Second => "2NF",
            NormalForm::Third => "3NF",
        }
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single violation found by one of the form checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalFormViolation {
    /// A cell holds a composite or multi-valued structure.
    NonAtomicValue { attribute: String, row: usize },
    /// A non-prime attribute depends on part of a candidate key.
    PartialDependency {
        determinant: Vec<String>,
        dependent: String,
        reason: String,
    },
    /// A non-prime attribute depends on another non-prime, non-key set.
    TransitiveDependency {
        determinant: Vec<String>,
        dependent: String,
        reason: String,
    },
}

/// Outcome of a single normal form check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormCheck {
    /// True iff no violations were found.
    pub satisfied: bool,
    /// The violations, empty when satisfied.
    pub violations: Vec<NormalFormViolation>,
}

impl FormCheck {
    /// Build a check result from a violation list.
    pub fn from_violations(violations: Vec<NormalFormViolation>) -> Self {
        Self {
            satisfied: violations.is_empty(),
            violations,
        }
    }
}

/// Combined compliance report across all three checked forms.
///
/// Each check is reported independently, but `current_form` is gated: a
/// higher form only counts as reached when every lower one is satisfied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalFormReport {
    #[serde(rename = "1NF")]
    pub first: FormCheck,
    #[serde(rename = "2NF")]
    pub second: FormCheck,
    #[serde(rename = "3NF")]
    pub third: FormCheck,
    /// Highest form satisfied under the gating rule.
    #[serde(rename = "currentForm")]
    pub current_form: NormalForm,
}
