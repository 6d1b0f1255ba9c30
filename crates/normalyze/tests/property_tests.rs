//! Property-based tests for the normalization engine.
//!
//! These tests use proptest to generate random FD sets and datasets and
//! verify that the core algorithms maintain their invariants under all
//! conditions:
//!
//! 1. **No panics**: every component is total over well-formed input
//! 2. **Closure laws**: idempotence, monotonicity, scan-order independence
//! 3. **Key properties**: superkey upward closure, pairwise non-redundancy
//! 4. **Gating**: the reported current form implies all lower forms
//!
//! ```bash
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p normalyze --test property_tests
//! ```

use std::collections::BTreeSet;

use proptest::prelude::*;
use serde_json::json;

use normalyze::{
    closure, CandidateKeyFinder, Dataset, FdDetector, FunctionalDependency, NormalForm,
    NormalFormChecker, Row, SchemaDecomposer,
};

// =============================================================================
// Test Strategies
// =============================================================================

const UNIVERSE: [&str; 5] = ["a", "b", "c", "d", "e"];

fn universe() -> Vec<String> {
    UNIVERSE.iter().map(|s| s.to_string()).collect()
}

/// A single attribute drawn from the fixed universe.
fn attr() -> impl Strategy<Value = String> {
    prop::sample::select(&UNIVERSE[..]).prop_map(str::to_string)
}

/// An arbitrary (possibly empty) attribute subset.
fn attr_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(attr(), 0..=4)
}

/// A non-trivial functional dependency with a 1- or 2-attribute determinant.
fn fd_strategy() -> impl Strategy<Value = FunctionalDependency> {
    (prop::collection::btree_set(attr(), 1..=2), attr()).prop_filter_map(
        "dependent inside determinant",
        |(det, dep)| FunctionalDependency::new(det, dep, 1.0).ok(),
    )
}

/// A random FD set.
fn fd_set() -> impl Strategy<Value = Vec<FunctionalDependency>> {
    prop::collection::vec(fd_strategy(), 0..8)
}

/// A small random dataset over three integer attributes.
fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((0..4i64, 0..4i64, 0..4i64), 1..20).prop_map(|tuples| {
        let rows: Vec<Row> = tuples
            .into_iter()
            .map(|(x, y, z)| {
                [
                    ("x".to_string(), json!(x)),
                    ("y".to_string(), json!(y)),
                    ("z".to_string(), json!(z)),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        Dataset::new(vec!["x".into(), "y".into(), "z".into()], rows).unwrap()
    })
}

// =============================================================================
// Closure Properties
// =============================================================================

mod closure_tests {
    use super::*;

    proptest! {
        /// closure(closure(X, F), F) == closure(X, F).
        #[test]
        fn closure_is_idempotent(start in attr_set(), fds in fd_set()) {
            let once = closure(&start, &fds);
            let twice = closure(&once, &fds);
            prop_assert_eq!(once, twice);
        }

        /// X ⊆ Y implies closure(X, F) ⊆ closure(Y, F).
        #[test]
        fn closure_is_monotonic(x in attr_set(), extra in attr_set(), fds in fd_set()) {
            let y: BTreeSet<String> = x.union(&extra).cloned().collect();
            let cx = closure(&x, &fds);
            let cy = closure(&y, &fds);
            prop_assert!(cx.is_subset(&cy));
        }

        /// The closure contains its starting set.
        #[test]
        fn closure_is_extensive(start in attr_set(), fds in fd_set()) {
            let result = closure(&start, &fds);
            prop_assert!(start.is_subset(&result));
        }

        /// The result does not depend on FD scan order.
        #[test]
        fn closure_ignores_scan_order(start in attr_set(), mut fds in fd_set()) {
            let forward = closure(&start, &fds);
            fds.reverse();
            let backward = closure(&start, &fds);
            prop_assert_eq!(forward, backward);
        }
    }
}

// =============================================================================
// Candidate Key Properties
// =============================================================================

mod key_tests {
    use super::*;

    proptest! {
        /// Every superset of a superkey is a superkey.
        #[test]
        fn superkeys_are_upward_closed(base in attr_set(), extra in attr(), fds in fd_set()) {
            let finder = CandidateKeyFinder::new(universe(), fds);
            if finder.is_superkey(&base) {
                let mut grown = base.clone();
                grown.insert(extra);
                prop_assert!(finder.is_superkey(&grown));
            }
        }

        /// Every returned key (fallback included) closes over the universe.
        #[test]
        fn returned_keys_are_superkeys(fds in fd_set()) {
            let finder = CandidateKeyFinder::new(universe(), fds);
            let search = finder.find();
            prop_assert!(!search.keys.is_empty());
            for key in &search.keys {
                prop_assert!(finder.is_superkey(key));
            }
        }

        /// No returned key is a superset of another returned key.
        #[test]
        fn returned_keys_are_pairwise_irredundant(fds in fd_set()) {
            let finder = CandidateKeyFinder::new(universe(), fds);
            let search = finder.find();
            for key in &search.keys {
                for other in &search.keys {
                    if key != other {
                        prop_assert!(!key.is_superset(other));
                    }
                }
            }
        }
    }
}

// =============================================================================
// Detector Properties
// =============================================================================

mod detector_tests {
    use super::*;

    proptest! {
        /// Detection is total and every confidence stays within [0, 1].
        #[test]
        fn detection_confidences_are_bounded(ds in dataset()) {
            let detector = FdDetector::new();
            for fd in detector.detect_all(&ds) {
                prop_assert!((0.0..=1.0).contains(&fd.confidence));
                prop_assert!(!fd.determinant.contains(&fd.dependent));
            }
        }

        /// After left-reduction no retained FD extends another's determinant
        /// for the same dependent.
        #[test]
        fn left_reduction_removes_all_extensions(fds in fd_set()) {
            let reduced = FdDetector::remove_redundant(fds);
            for fd in &reduced {
                for other in &reduced {
                    prop_assert!(!fd.is_left_extension_of(other));
                }
            }
        }

        /// Detection is deterministic.
        #[test]
        fn detection_is_deterministic(ds in dataset()) {
            let detector = FdDetector::new();
            prop_assert_eq!(detector.detect_all(&ds), detector.detect_all(&ds));
        }
    }
}

// =============================================================================
// Classification and Decomposition Properties
// =============================================================================

mod pipeline_tests {
    use super::*;

    fn atomic_row() -> Row {
        universe()
            .into_iter()
            .map(|attr| (attr, json!(0)))
            .collect()
    }

    proptest! {
        /// The gated current form implies every lower form is satisfied.
        #[test]
        fn current_form_is_gated(fds in fd_set()) {
            let finder = CandidateKeyFinder::new(universe(), fds.clone());
            let keys = finder.find().keys;
            let checker = NormalFormChecker::new(fds, keys);
            let report = checker.analyze_all_forms(&[atomic_row()]);

            match report.current_form {
                NormalForm::Third => prop_assert!(
                    report.first.satisfied && report.second.satisfied && report.third.satisfied
                ),
                NormalForm::Second => {
                    prop_assert!(report.first.satisfied && report.second.satisfied)
                }
                NormalForm::First => prop_assert!(report.first.satisfied),
                NormalForm::Unf => prop_assert!(!report.first.satisfied),
            }
        }

        /// Every decomposition stage covers the full attribute universe.
        #[test]
        fn stages_cover_the_universe(fds in fd_set()) {
            let finder = CandidateKeyFinder::new(universe(), fds.clone());
            let keys = finder.find().keys;
            let decomposer = SchemaDecomposer::new("r", universe(), fds, keys);

            let expected: BTreeSet<String> = universe().into_iter().collect();
            for stage in decomposer.normalize_complete() {
                prop_assert_eq!(stage.attribute_union(), expected.clone());
            }
        }

        /// Primary keys always lie within their table's attributes.
        #[test]
        fn primary_keys_stay_inside_their_tables(fds in fd_set()) {
            let finder = CandidateKeyFinder::new(universe(), fds.clone());
            let keys = finder.find().keys;
            let decomposer = SchemaDecomposer::new("r", universe(), fds, keys);

            for stage in decomposer.normalize_complete() {
                for table in &stage.tables {
                    prop_assert!(table.contains_all(&table.primary_key));
                }
            }
        }
    }
}
