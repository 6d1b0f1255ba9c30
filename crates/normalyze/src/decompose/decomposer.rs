//! Staged decomposition: 1NF pass-through, 2NF partial split, 3NF
//! transitive split.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::fd::FunctionalDependency;
use crate::nf::{is_partial_dependency, NormalForm};

use super::{ForeignKey, NormalizationStage, TableSchema};

/// Transforms one wide relation into normalized table sets, one stage per
/// normal form.
///
/// A pure functional pipeline: each stage consumes the previous stage's
/// table list and produces a new one; nothing is shared between stages
/// beyond that explicit hand-off. The prime attribute set is derived once at
/// construction.
pub struct SchemaDecomposer {
    relation_name: String,
    attributes: Vec<String>,
    fds: Vec<FunctionalDependency>,
    candidate_keys: Vec<BTreeSet<String>>,
    prime_attributes: BTreeSet<String>,
}

impl SchemaDecomposer {
    /// Create a decomposer for one relation.
    pub fn new(
        relation_name: impl Into<String>,
        attributes: Vec<String>,
        fds: Vec<FunctionalDependency>,
        candidate_keys: Vec<BTreeSet<String>>,
    ) -> Self {
        let prime_attributes = candidate_keys.iter().flatten().cloned().collect();
        Self {
            relation_name: relation_name.into(),
            attributes,
            fds,
            candidate_keys,
            prime_attributes,
        }
    }

    /// 1NF stage: structurally a no-op. The original relation comes back as
    /// one table keyed by the first candidate key (or the full attribute
    /// list when none exists); flattening of multi-valued attributes is
    /// assumed to have happened upstream.
    pub fn decompose_to_1nf(&self) -> NormalizationStage {
        let primary_key = self
            .candidate_keys
            .first()
            .cloned()
            .unwrap_or_else(|| self.attributes.iter().cloned().collect());

        NormalizationStage {
            normal_form: NormalForm::First,
            tables: vec![TableSchema::new(
                self.relation_name.clone(),
                self.attributes.clone(),
                primary_key,
            )],
            transformations: vec![
                "Ensured all attributes contain atomic values".to_string(),
            ],
        }
    }

    /// 2NF stage: split out every partial-dependency group.
    ///
    /// Partial FDs are grouped by canonical determinant identity; each group
    /// becomes a table whose attributes are the determinant plus its
    /// dependents, keyed by the determinant. Grouped dependents leave the
    /// main table, which keeps the original candidate key and gains a
    /// foreign key edge to each split-off table.
    pub fn decompose_to_2nf(&self) -> NormalizationStage {
        let partials: Vec<&FunctionalDependency> = self
            .fds
            .iter()
            .filter(|fd| {
                is_partial_dependency(fd, &self.prime_attributes, &self.candidate_keys)
            })
            .collect();

        let grouped = group_by_determinant(&partials);

        let mut tables = Vec::new();
        let mut transformations = Vec::new();
        let mut removed: BTreeSet<String> = BTreeSet::new();
        let mut foreign_keys = Vec::new();

        for (index, (determinant, dependents)) in grouped.iter().enumerate() {
            let name = format!("{}_{}", self.relation_name, index + 1);
            let mut attributes: Vec<String> = determinant.iter().cloned().collect();
            attributes.extend(dependents.iter().cloned());

            transformations.push(format!(
                "Moved {} into {} (depends on {})",
                dependents.join(", "),
                name,
                attributes[..determinant.len()].join(", ")
            ));

            foreign_keys.push(ForeignKey {
                columns: determinant.iter().cloned().collect(),
                referenced_table: name.clone(),
            });

            tables.push(TableSchema::new(name, attributes, determinant.clone()));
            removed.extend(dependents.iter().cloned());
        }

        let main_attributes: Vec<String> = self
            .attributes
            .iter()
            .filter(|attr| !removed.contains(*attr))
            .cloned()
            .collect();
        let main_key = self
            .candidate_keys
            .first()
            .cloned()
            .unwrap_or_else(|| self.attributes.iter().cloned().collect());

        let mut main = TableSchema::new(self.relation_name.clone(), main_attributes, main_key);
        main.foreign_keys = foreign_keys;
        tables.push(main);

        NormalizationStage {
            normal_form: NormalForm::Second,
            tables,
            transformations,
        }
    }

    /// 3NF stage: for each table from the 2NF stage, split out transitive
    /// dependency groups among the FDs fully internal to that table.
    ///
    /// A dependency is transitive here when its determinant and dependent
    /// are all non-prime and the determinant is not the table's own primary
    /// key. Each group spins off a `{parent}_detail_{n}` table; the parent
    /// drops the dependents and records a foreign key edge to the sub-table.
    pub fn decompose_to_3nf(&self, tables: &[TableSchema]) -> NormalizationStage {
        let mut result = Vec::new();
        let mut transformations = Vec::new();

        for table in tables {
            let internal: Vec<&FunctionalDependency> = self
                .fds
                .iter()
                .filter(|fd| table.contains_all(&fd.determinant) && table.contains(&fd.dependent))
                .collect();

            let transitive: Vec<&FunctionalDependency> = internal
                .into_iter()
                .filter(|fd| self.is_table_transitive(fd, table))
                .collect();

            let grouped = group_by_determinant(&transitive);

            let mut removed: BTreeSet<String> = BTreeSet::new();
            let mut foreign_keys = table.foreign_keys.clone();

            for (index, (determinant, dependents)) in grouped.iter().enumerate() {
                let name = format!("{}_detail_{}", table.name, index + 1);
                let mut attributes: Vec<String> = determinant.iter().cloned().collect();
                attributes.extend(dependents.iter().cloned());

                transformations.push(format!(
                    "Moved {} from {} into {} (depends on {})",
                    dependents.join(", "),
                    table.name,
                    name,
                    attributes[..determinant.len()].join(", ")
                ));

                foreign_keys.push(ForeignKey {
                    columns: determinant.iter().cloned().collect(),
                    referenced_table: name.clone(),
                });

                result.push(TableSchema::new(name, attributes, determinant.clone()));
                removed.extend(dependents.iter().cloned());
            }

            let parent_attributes: Vec<String> = table
                .attributes
                .iter()
                .filter(|attr| !removed.contains(*attr))
                .cloned()
                .collect();

            // A chained transitive split can move an FK column out of the
            // parent; such edges are unjoinable from the parent and are
            // dropped. The moved column's own table still links onward.
            let foreign_keys: Vec<ForeignKey> = foreign_keys
                .into_iter()
                .filter(|fk| fk.columns.iter().all(|c| parent_attributes.contains(c)))
                .collect();

            let mut parent = TableSchema::new(
                table.name.clone(),
                parent_attributes,
                table.primary_key.clone(),
            );
            parent.foreign_keys = foreign_keys;
            result.push(parent);
        }

        NormalizationStage {
            normal_form: NormalForm::Third,
            tables: result,
            transformations,
        }
    }

    /// Run all three stages in order.
    pub fn normalize_complete(&self) -> Vec<NormalizationStage> {
        let first = self.decompose_to_1nf();
        let second = self.decompose_to_2nf();
        let third = self.decompose_to_3nf(&second.tables);
        vec![first, second, third]
    }

    /// Table-local transitive predicate: determinant and dependent all
    /// non-prime, determinant not equal to the table's primary key.
    fn is_table_transitive(&self, fd: &FunctionalDependency, table: &TableSchema) -> bool {
        let determinant_non_prime = fd
            .determinant
            .iter()
            .all(|attr| !self.prime_attributes.contains(attr));
        determinant_non_prime
            && !self.prime_attributes.contains(&fd.dependent)
            && fd.determinant != table.primary_key
    }
}

/// Group dependencies by canonical determinant identity.
///
/// `BTreeMap<BTreeSet<_>, _>` keys are value sets, so grouping cannot depend
/// on attribute insertion order, and no shared attribute list is mutated.
fn group_by_determinant(
    fds: &[&FunctionalDependency],
) -> BTreeMap<BTreeSet<String>, Vec<String>> {
    let mut grouped: BTreeMap<BTreeSet<String>, Vec<String>> = BTreeMap::new();
    for fd in fds {
        let dependents = grouped.entry(fd.determinant.clone()).or_default();
        if !dependents.contains(&fd.dependent) {
            dependents.push(fd.dependent.clone());
        }
    }
    grouped
}

/// Result of checking the lossless-join invariant over a stage's tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LosslessCheck {
    /// Attributes of the universe that appear in no table.
    pub missing_attributes: Vec<String>,
    /// Dependencies whose determinant is split across tables.
    pub split_determinants: Vec<String>,
}

impl LosslessCheck {
    /// True when the decomposition passes both checks.
    pub fn is_lossless(&self) -> bool {
        self.missing_attributes.is_empty() && self.split_determinants.is_empty()
    }
}

/// Check the reconstructability invariant: the tables must jointly cover the
/// attribute universe, and every dependency's determinant must be fully
/// contained within at least one table.
pub fn verify_lossless(
    tables: &[TableSchema],
    universe: &[String],
    fds: &[FunctionalDependency],
) -> LosslessCheck {
    let missing_attributes: Vec<String> = universe
        .iter()
        .filter(|attr| !tables.iter().any(|t| t.contains(attr)))
        .cloned()
        .collect();

    let split_determinants: Vec<String> = fds
        .iter()
        .filter(|fd| !tables.iter().any(|t| t.contains_all(&fd.determinant)))
        .map(|fd| fd.to_string())
        .collect();

    LosslessCheck {
        missing_attributes,
        split_determinants,
    }
}
