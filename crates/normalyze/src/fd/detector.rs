//! Heuristic functional dependency detection over sample rows.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::{Dataset, Row};

use super::FunctionalDependency;

/// Configuration for the dependency detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum confidence for a dependency to be reported as holding.
    pub confidence_threshold: f64,
    /// Pair determinants are only searched when the attribute count is at or
    /// below this cap; above it only single-attribute determinants are tested.
    pub max_pairwise_attributes: usize,
    /// Optional cap on the number of rows inspected (None = all rows).
    pub max_rows: Option<usize>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.98,
            max_pairwise_attributes: 15,
            max_rows: None,
        }
    }
}

/// Result of testing a single candidate dependency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DependencyTest {
    /// Whether the confidence met the threshold.
    pub holds: bool,
    /// `1 - violations / row_count`; 0.0 for an empty row set.
    pub confidence: f64,
    /// Number of excess dependent values across determinant partitions.
    pub violations: usize,
}

/// Detects functional dependencies that appear to hold in sample data.
///
/// The search is a deliberate, bounded heuristic: every single attribute and
/// (under the pairwise cap) every unordered attribute pair is tested as a
/// determinant. Determinants of size three or more are never tested directly;
/// they surface only through closure expansion in later stages.
pub struct FdDetector {
    config: DetectorConfig,
}

impl FdDetector {
    /// Create a detector with default settings.
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    /// Create a detector with custom settings.
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Test whether `determinant → dependent` holds over `rows`.
    ///
    /// Rows are partitioned by their determinant value tuple; each partition
    /// holding more than one distinct dependent value contributes
    /// `distinct - 1` violations. A zero-row input is a degenerate
    /// computation and yields `holds=false, confidence=0` rather than a
    /// division by zero. Nulls compare equal within a tuple.
    pub fn test_dependency(
        &self,
        determinant: &BTreeSet<String>,
        dependent: &str,
        rows: &[Row],
    ) -> DependencyTest {
        if rows.is_empty() {
            return DependencyTest {
                holds: false,
                confidence: 0.0,
                violations: 0,
            };
        }

        let mut partitions: HashMap<String, HashSet<String>> = HashMap::new();

        for row in rows {
            let key = Self::tuple_key(determinant, row);
            let value = row.get(dependent).unwrap_or(&Value::Null).to_string();
            partitions.entry(key).or_default().insert(value);
        }

        let violations: usize = partitions
            .values()
            .map(|distinct| distinct.len().saturating_sub(1))
            .sum();

        let confidence = 1.0 - violations as f64 / rows.len() as f64;

        DependencyTest {
            holds: confidence >= self.config.confidence_threshold,
            confidence,
            violations,
        }
    }

    /// Detect all dependencies that hold over the dataset's sample rows.
    ///
    /// For each attribute as dependent, every other single attribute is
    /// tested as a determinant; unordered pairs are tested only when the
    /// attribute count is within `max_pairwise_attributes`. Redundant
    /// dependencies are then left-reduced away.
    pub fn detect_all(&self, dataset: &Dataset) -> Vec<FunctionalDependency> {
        let rows = match self.config.max_rows {
            Some(n) => dataset.sample(n),
            None => &dataset.rows,
        };
        let attributes = &dataset.attributes;
        let mut found = Vec::new();

        for dependent in attributes {
            for single in attributes {
                if single == dependent {
                    continue;
                }
                let determinant: BTreeSet<String> = [single.clone()].into_iter().collect();
                let test = self.test_dependency(&determinant, dependent, rows);
                if test.holds {
                    found.push(FunctionalDependency {
                        determinant,
                        dependent: dependent.clone(),
                        confidence: test.confidence,
                    });
                }
            }

            if attributes.len() <= self.config.max_pairwise_attributes {
                for i in 0..attributes.len() {
                    for j in (i + 1)..attributes.len() {
                        if &attributes[i] == dependent || &attributes[j] == dependent {
                            continue;
                        }
                        let determinant: BTreeSet<String> =
                            [attributes[i].clone(), attributes[j].clone()]
                                .into_iter()
                                .collect();
                        let test = self.test_dependency(&determinant, dependent, rows);
                        if test.holds {
                            found.push(FunctionalDependency {
                                determinant,
                                dependent: dependent.clone(),
                                confidence: test.confidence,
                            });
                        }
                    }
                }
            }
        }

        Self::remove_redundant(found)
    }

    /// Left-reduction: drop any dependency whose determinant is a strict
    /// superset of another retained dependency's determinant with the same
    /// dependent.
    pub fn remove_redundant(fds: Vec<FunctionalDependency>) -> Vec<FunctionalDependency> {
        let retained: Vec<FunctionalDependency> = fds
            .iter()
            .filter(|fd| !fds.iter().any(|other| fd.is_left_extension_of(other)))
            .cloned()
            .collect();
        retained
    }

    /// Stable grouping key for a row's determinant value tuple.
    fn tuple_key(determinant: &BTreeSet<String>, row: &Row) -> String {
        let values: Vec<Value> = determinant
            .iter()
            .map(|attr| row.get(attr).cloned().unwrap_or(Value::Null))
            .collect();
        Value::Array(values).to_string()
    }
}

impl Default for FdDetector {
    fn default() -> Self {
        Self::new()
    }
}
