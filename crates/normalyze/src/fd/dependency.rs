//! The functional dependency value type.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NormalyzeError, Result};

/// A functional dependency X → Y: the determinant set X fixes the value of
/// the dependent attribute Y.
///
/// The determinant is stored as a `BTreeSet`, so two dependencies with the
/// same attributes in different insertion orders compare equal and serialize
/// identically. This is what makes canonical determinant grouping during
/// decomposition order-independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalDependency {
    /// Left-hand side: a non-empty attribute set.
    pub determinant: BTreeSet<String>,
    /// Right-hand side: a single attribute, never a member of the determinant.
    pub dependent: String,
    /// Observed confidence in [0, 1].
    pub confidence: f64,
}

impl FunctionalDependency {
    /// Create a dependency. The determinant must be non-empty and must not
    /// contain the dependent.
    pub fn new(
        determinant: impl IntoIterator<Item = String>,
        dependent: impl Into<String>,
        confidence: f64,
    ) -> Result<Self> {
        let determinant: BTreeSet<String> = determinant.into_iter().collect();
        let dependent = dependent.into();

        if determinant.is_empty() {
            return Err(NormalyzeError::EmptyDeterminant);
        }
        if determinant.contains(&dependent) {
            return Err(NormalyzeError::TrivialDependency { dependent });
        }

        Ok(Self {
            determinant,
            dependent,
            confidence,
        })
    }

    /// The determinant attributes in canonical (sorted) order.
    pub fn canonical_determinant(&self) -> Vec<String> {
        self.determinant.iter().cloned().collect()
    }

    /// True if this dependency's determinant strictly contains `other`'s
    /// determinant and both share a dependent. Such a dependency is redundant
    /// under left-reduction.
    pub fn is_left_extension_of(&self, other: &FunctionalDependency) -> bool {
        self.dependent == other.dependent
            && other.determinant.is_subset(&self.determinant)
            && other.determinant.len() < self.determinant.len()
    }
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lhs: Vec<&str> = self.determinant.iter().map(String::as_str).collect();
        write!(f, "{{{}}} -> {}", lhs.join(", "), self.dependent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fd(det: &[&str], dep: &str) -> FunctionalDependency {
        FunctionalDependency::new(det.iter().map(|s| s.to_string()), dep, 1.0).unwrap()
    }

    #[test]
    fn test_empty_determinant_rejected() {
        let err = FunctionalDependency::new(Vec::<String>::new(), "a", 1.0).unwrap_err();
        assert!(matches!(err, NormalyzeError::EmptyDeterminant));
    }

    #[test]
    fn test_trivial_dependency_rejected() {
        let err = FunctionalDependency::new(vec!["a".to_string()], "a", 1.0).unwrap_err();
        assert!(matches!(err, NormalyzeError::TrivialDependency { .. }));
    }

    #[test]
    fn test_determinant_order_is_canonical() {
        let ab = fd(&["a", "b"], "c");
        let ba = fd(&["b", "a"], "c");
        assert_eq!(ab, ba);
        assert_eq!(ab.canonical_determinant(), vec!["a", "b"]);
    }

    #[test]
    fn test_left_extension() {
        let small = fd(&["a"], "c");
        let large = fd(&["a", "b"], "c");
        let other = fd(&["a", "b"], "d");

        assert!(large.is_left_extension_of(&small));
        assert!(!small.is_left_extension_of(&large));
        assert!(!other.is_left_extension_of(&small));
    }

    #[test]
    fn test_display() {
        assert_eq!(fd(&["b", "a"], "c").to_string(), "{a, b} -> c");
    }
}
