//! Layered normal form checks with gated classification.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::fd::FunctionalDependency;
use crate::input::Row;

use super::{FormCheck, NormalForm, NormalFormReport, NormalFormViolation};

/// Partial-dependency predicate: the dependent is non-prime and the
/// determinant is a strict subset of some candidate key.
pub fn is_partial_dependency(
    fd: &FunctionalDependency,
    prime: &BTreeSet<String>,
    candidate_keys: &[BTreeSet<String>],
) -> bool {
    if prime.contains(&fd.dependent) {
        return false;
    }
    candidate_keys
        .iter()
        .any(|key| fd.determinant.is_subset(key) && fd.determinant.len() < key.len())
}

/// Transitive-dependency predicate: every determinant attribute and the
/// dependent are non-prime, and the determinant is not itself a candidate key.
pub fn is_transitive_dependency(
    fd: &FunctionalDependency,
    prime: &BTreeSet<String>,
    candidate_keys: &[BTreeSet<String>],
) -> bool {
    let determinant_non_prime = fd.determinant.iter().all(|attr| !prime.contains(attr));
    if !determinant_non_prime || prime.contains(&fd.dependent) {
        return false;
    }
    !candidate_keys.iter().any(|key| *key == fd.determinant)
}

/// Classifies a relation's compliance with 1NF, 2NF and 3NF.
///
/// Not a state machine: each check is a declarative predicate over the FD
/// set and candidate keys, and the prime attribute set is derived once at
/// construction as a read-only field.
pub struct NormalFormChecker {
    fds: Vec<FunctionalDependency>,
    candidate_keys: Vec<BTreeSet<String>>,
    prime_attributes: BTreeSet<String>,
}

impl NormalFormChecker {
    /// Create a checker for the given dependencies and candidate keys.
    pub fn new(fds: Vec<FunctionalDependency>, candidate_keys: Vec<BTreeSet<String>>) -> Self {
        let prime_attributes = candidate_keys.iter().flatten().cloned().collect();
        Self {
            fds,
            candidate_keys,
            prime_attributes,
        }
    }

    /// The union of attributes across all candidate keys.
    pub fn prime_attributes(&self) -> &BTreeSet<String> {
        &self.prime_attributes
    }

    /// 1NF: every cell holds an atomic scalar. Arrays and nested objects are
    /// composite structures and fail the check.
    pub fn check_1nf(&self, rows: &[Row]) -> FormCheck {
        let mut violations = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            for (attribute, value) in row {
                if matches!(value, Value::Array(_) | Value::Object(_)) {
                    violations.push(NormalFormViolation::NonAtomicValue {
                        attribute: attribute.clone(),
                        row: idx,
                    });
                }
            }
        }

        FormCheck::from_violations(violations)
    }

    /// 2NF: no non-prime attribute depends on a strict subset of a key.
    pub fn check_2nf(&self) -> FormCheck {
        let violations = self
            .fds
            .iter()
            .filter(|fd| is_partial_dependency(fd, &self.prime_attributes, &self.candidate_keys))
            .map(|fd| NormalFormViolation::PartialDependency {
                determinant: fd.canonical_determinant(),
                dependent: fd.dependent.clone(),
                reason: format!(
                    "{} partially depends on {}",
                    fd.dependent,
                    fd.canonical_determinant().join(", ")
                ),
            })
            .collect();

        FormCheck::from_violations(violations)
    }

    /// 3NF: no non-prime attribute depends on a non-prime, non-key set.
    pub fn check_3nf(&self) -> FormCheck {
        let violations = self
            .fds
            .iter()
            .filter(|fd| {
                is_transitive_dependency(fd, &self.prime_attributes, &self.candidate_keys)
            })
            .map(|fd| NormalFormViolation::TransitiveDependency {
                determinant: fd.canonical_determinant(),
                dependent: fd.dependent.clone(),
                reason: format!(
                    "{} transitively depends on {}",
                    fd.dependent,
                    fd.canonical_determinant().join(", ")
                ),
            })
            .collect();

        FormCheck::from_violations(violations)
    }

    /// Run all three checks and classify the current form under gating:
    /// if 1NF fails the relation is UNF regardless of the other results.
    pub fn analyze_all_forms(&self, rows: &[Row]) -> NormalFormReport {
        let first = self.check_1nf(rows);
        let second = self.check_2nf();
        let third = self.check_3nf();

        let mut current_form = NormalForm::Unf;
        if first.satisfied {
            current_form = NormalForm::First;
            if second.satisfied {
                current_form = NormalForm::Second;
                if third.satisfied {
                    current_form = NormalForm::Third;
                }
            }
        }

        NormalFormReport {
            first,
            second,
            third,
            current_form,
        }
    }
}
